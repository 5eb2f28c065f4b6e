//! Placeholder substitution for email templates
//!
//! Two token styles are accepted for every value: the Italian bracket form
//! (`[nome_lancio]`) and the dotted mustache form (`{{launch.name}}`,
//! whitespace inside the braces allowed). Replacement runs one regex per
//! token in table order; unknown tokens are left as they are.

use chrono::NaiveDate;
use regex::{NoExpand, Regex};
use shared::error::{AppError, AppResult};
use shared::models::{Launch, Store, StoreCategory, Tactician};

/// (bracket token, mustache key)
const PLACEHOLDERS: &[(&str, &str)] = &[
    ("nome_negozio", "store.name"),
    ("indirizzo_negozio", "store.address"),
    ("citta_negozio", "store.city"),
    ("provincia_negozio", "store.province"),
    ("catena", "store.chain"),
    ("responsabile_negozio", "store.manager_name"),
    ("nome_lancio", "launch.name"),
    ("date_lancio", "launch.dates"),
    ("data_visita", "visit.date"),
    ("tipo_visita", "visit.type"),
    ("nome_tattico", "tactician.name"),
    ("email_tattico", "tactician.email"),
    ("telefono_tattico", "tactician.phone"),
    ("link_cartelli", "price_tags.url"),
];

/// Entities a template is rendered against
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub store: Option<Store>,
    pub launch: Option<Launch>,
    pub visit_date: Option<NaiveDate>,
    pub visit_type: Option<StoreCategory>,
    pub tactician: Option<Tactician>,
    /// Public price-tag page of (launch, store)
    pub price_tags_url: Option<String>,
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl TemplateContext {
    /// Value for a mustache key; missing entities render as empty text
    fn value(&self, key: &str) -> String {
        let store = self.store.as_ref();
        let launch = self.launch.as_ref();
        let tactician = self.tactician.as_ref();
        match key {
            "store.name" => store.map(|s| s.name.clone()).unwrap_or_default(),
            "store.address" => store.map(|s| opt(&s.address)).unwrap_or_default(),
            "store.city" => store.map(|s| opt(&s.city)).unwrap_or_default(),
            "store.province" => store.map(|s| opt(&s.province)).unwrap_or_default(),
            "store.chain" => store.map(|s| s.chain.to_string()).unwrap_or_default(),
            "store.manager_name" => store.map(|s| opt(&s.manager_name)).unwrap_or_default(),
            "launch.name" => launch.map(|l| l.name.clone()).unwrap_or_default(),
            "launch.dates" => launch
                .map(|l| {
                    l.dates
                        .iter()
                        .map(|d| format_date(*d))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default(),
            "visit.date" => self.visit_date.map(format_date).unwrap_or_default(),
            "visit.type" => match self.visit_type {
                Some(StoreCategory::White) => "White".to_string(),
                Some(StoreCategory::Tier2) => "Tier 2".to_string(),
                None => String::new(),
            },
            "tactician.name" => tactician.map(|t| t.name.clone()).unwrap_or_default(),
            "tactician.email" => tactician.map(|t| opt(&t.email)).unwrap_or_default(),
            "tactician.phone" => tactician.map(|t| opt(&t.phone)).unwrap_or_default(),
            "price_tags.url" => self.price_tags_url.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Substitute every known placeholder in `text`
pub fn render(text: &str, ctx: &TemplateContext) -> AppResult<String> {
    let mut out = text.to_string();
    for (bracket, key) in PLACEHOLDERS {
        let value = ctx.value(key);

        let bracket_re = Regex::new(&format!(r"(?i)\[{}\]", regex::escape(bracket)))
            .map_err(|e| AppError::internal(format!("Invalid placeholder pattern: {e}")))?;
        out = bracket_re.replace_all(&out, NoExpand(&value)).into_owned();

        let mustache_re = Regex::new(&format!(r"\{{\{{\s*{}\s*\}}\}}", regex::escape(key)))
            .map_err(|e| AppError::internal(format!("Invalid placeholder pattern: {e}")))?;
        out = mustache_re.replace_all(&out, NoExpand(&value)).into_owned();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Chain, LaunchStatus};

    fn ctx() -> TemplateContext {
        TemplateContext {
            store: Some(Store {
                id: 1,
                name: "Comet Bologna".into(),
                category: StoreCategory::White,
                chain: Chain::Comet,
                address: Some("Via Emilia 1".into()),
                city: Some("Bologna".into()),
                province: Some("BO".into()),
                phone: None,
                email: None,
                manager_name: None,
                notes: None,
                created_at: 0,
                updated_at: 0,
            }),
            launch: Some(Launch {
                id: 2,
                name: "iPhone 17".into(),
                description: None,
                status: LaunchStatus::Opened,
                dates: vec![
                    NaiveDate::from_ymd_opt(2026, 9, 19).unwrap(),
                    NaiveDate::from_ymd_opt(2026, 9, 20).unwrap(),
                ],
                device_ids: vec![],
                created_at: 0,
                updated_at: 0,
            }),
            visit_date: NaiveDate::from_ymd_opt(2026, 10, 21),
            visit_type: Some(StoreCategory::Tier2),
            tactician: None,
            price_tags_url: None,
        }
    }

    #[test]
    fn test_render_both_token_styles() {
        let out = render(
            "Lancio [nome_lancio] presso {{store.name}} ({{ store.city }}) il [DATA_VISITA]",
            &ctx(),
        )
        .unwrap();
        assert_eq!(out, "Lancio iPhone 17 presso Comet Bologna (Bologna) il 21/10/2026");
    }

    #[test]
    fn test_render_lists_and_missing_values() {
        let out = render("[date_lancio] / [nome_tattico]/ {{visit.type}}", &ctx()).unwrap();
        assert_eq!(out, "19/09/2026, 20/09/2026 / / Tier 2");
    }

    #[test]
    fn test_unknown_tokens_and_dollar_signs_survive() {
        let mut c = ctx();
        if let Some(store) = c.store.as_mut() {
            store.name = "Store $1".into();
        }
        let out = render("[sconosciuto] {{store.name}} {{foo.bar}}", &c).unwrap();
        assert_eq!(out, "[sconosciuto] Store $1 {{foo.bar}}");
    }
}
