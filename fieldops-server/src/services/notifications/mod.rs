//! Email notifications
//!
//! Templates are rendered against stores, launches, visits and tacticians,
//! then either turned into a `mailto:` link for the user's mail client or
//! delivered through the remote email function.

pub mod mailer;
pub mod mailto;
pub mod template;

pub use mailer::EmailFunctionClient;
pub use mailto::build_mailto;
pub use template::{TemplateContext, render};

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    EmailLog, EmailStatus, EmailTemplate, MailtoLink, MailtoRequest, RenderRequest, RenderedEmail,
    SendEmailRequest,
};
use sqlx::SqlitePool;

use crate::db::repository::{email, launch, store, tactician, visit};
use crate::utils::validation::validate_email;

/// Public price-tag page of a (launch, store) pair
pub fn price_tags_url(public_base_url: &str, launch_slug: &str, store_slug: &str) -> String {
    format!("{public_base_url}/cartelli_prezzo/{launch_slug}/{store_slug}")
}

/// Resolve the entities named in a render request.
///
/// A visit fills in its store, launch, date and type unless the request
/// names them explicitly.
pub async fn build_context(
    pool: &SqlitePool,
    req: &RenderRequest,
    public_base_url: &str,
) -> AppResult<TemplateContext> {
    let mut ctx = TemplateContext::default();
    let mut store_id = req.store_id;
    let mut launch_id = req.launch_id;

    if let Some(id) = req.visit_id {
        let v = visit::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::VisitNotFound).with_detail("visit_id", id))?;
        store_id = store_id.or(Some(v.store_id));
        launch_id = launch_id.or(v.launch_id);
        ctx.visit_date = Some(v.scheduled_date);
        ctx.visit_type = Some(v.visit_type);
    }
    if let Some(date) = req.visit_date {
        ctx.visit_date = Some(date);
    }

    if let Some(id) = store_id {
        let s = store::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound).with_detail("store_id", id))?;
        if ctx.visit_type.is_none() {
            ctx.visit_type = Some(s.category);
        }
        ctx.store = Some(s);
    }
    if let Some(id) = launch_id {
        ctx.launch = Some(
            launch::find_by_id(pool, id)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::LaunchNotFound).with_detail("launch_id", id))?,
        );
    }
    if let Some(id) = req.tactician_id {
        ctx.tactician = Some(
            tactician::find_by_id(pool, id).await?.ok_or_else(|| {
                AppError::new(ErrorCode::TacticianNotFound).with_detail("tactician_id", id)
            })?,
        );
    }

    if let (Some(l), Some(s)) = (&ctx.launch, &ctx.store) {
        ctx.price_tags_url = Some(price_tags_url(public_base_url, &l.slug(), &s.slug()));
    }
    Ok(ctx)
}

async fn load_template(pool: &SqlitePool, template_id: i64) -> AppResult<EmailTemplate> {
    email::find_by_id(pool, template_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TemplateNotFound).with_detail("id", template_id))
}

fn validate_recipients(to: &[String], cc: &[String]) -> AppResult<()> {
    if to.is_empty() {
        return Err(AppError::validation("At least one recipient is required"));
    }
    for address in to {
        validate_email(address, "to")?;
    }
    for address in cc {
        validate_email(address, "cc")?;
    }
    Ok(())
}

/// Render a stored template
pub async fn render_template(
    pool: &SqlitePool,
    template_id: i64,
    req: &RenderRequest,
    public_base_url: &str,
) -> AppResult<RenderedEmail> {
    let template = load_template(pool, template_id).await?;
    let ctx = build_context(pool, req, public_base_url).await?;
    Ok(RenderedEmail {
        subject: render(&template.subject, &ctx)?,
        body: render(&template.body, &ctx)?,
    })
}

/// Render a template into a `mailto:` link
pub async fn mailto_link(
    pool: &SqlitePool,
    template_id: i64,
    req: &MailtoRequest,
    public_base_url: &str,
) -> AppResult<MailtoLink> {
    validate_recipients(&req.to, &req.cc)?;
    let rendered = render_template(pool, template_id, &req.render, public_base_url).await?;
    Ok(MailtoLink {
        uri: build_mailto(&req.to, &req.cc, &rendered.subject, &rendered.body),
        subject: rendered.subject,
        body: rendered.body,
    })
}

/// Render and deliver through the remote email function.
///
/// Every delivery attempt is recorded in the email log, failed ones included.
pub async fn send_email(
    pool: &SqlitePool,
    mailer: Option<&EmailFunctionClient>,
    template_id: i64,
    req: &SendEmailRequest,
    public_base_url: &str,
) -> AppResult<EmailLog> {
    let mailer = mailer.ok_or_else(|| AppError::new(ErrorCode::EmailNotConfigured))?;
    validate_recipients(&req.to, &req.cc)?;

    let rendered = render_template(pool, template_id, &req.render, public_base_url).await?;
    let recipients = req.to.iter().chain(req.cc.iter()).cloned().collect::<Vec<_>>().join(",");

    match mailer.send(&req.to, &req.cc, &rendered.subject, &rendered.body).await {
        Ok(()) => Ok(email::log_attempt(
            pool,
            Some(template_id),
            &recipients,
            &rendered.subject,
            EmailStatus::Sent,
            None,
        )
        .await?),
        Err(err) => {
            tracing::warn!(template_id, error = %err, "Email delivery failed");
            email::log_attempt(
                pool,
                Some(template_id),
                &recipients,
                &rendered.subject,
                EmailStatus::Failed,
                Some(&err.message),
            )
            .await?;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, seed_store};
    use shared::models::{Chain, EmailTemplateCreate, StoreCategory};

    async fn seed_template(pool: &SqlitePool) -> EmailTemplate {
        email::create(
            pool,
            EmailTemplateCreate {
                name: "Conferma visita".into(),
                subject: "Visita [nome_negozio] - [nome_lancio]".into(),
                body: "Il {{visit.date}} passeremo da {{store.name}}.\nCartelli: [link_cartelli]"
                    .into(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_render_from_visit() {
        let pool = crate::db::test_pool().await;
        let s = seed_store(&pool, "Comet Bologna", StoreCategory::White, Chain::Comet).await;
        let l = launch::create(&pool, "iPhone 17", None, &[], &[]).await.unwrap();
        let v = visit::insert(&pool, s.id, Some(l.id), date("2026-10-21"), StoreCategory::White, None)
            .await
            .unwrap();
        let t = seed_template(&pool).await;

        let req = RenderRequest {
            visit_id: Some(v.id),
            ..Default::default()
        };
        let out = render_template(&pool, t.id, &req, "https://ops.example").await.unwrap();
        assert_eq!(out.subject, "Visita Comet Bologna - iPhone 17");
        assert_eq!(
            out.body,
            "Il 21/10/2026 passeremo da Comet Bologna.\nCartelli: https://ops.example/cartelli_prezzo/iphone-17/comet-bologna"
        );
    }

    #[tokio::test]
    async fn test_mailto_and_missing_entities() {
        let pool = crate::db::test_pool().await;
        let s = seed_store(&pool, "Comet Bologna", StoreCategory::White, Chain::Comet).await;
        let t = seed_template(&pool).await;

        let req = MailtoRequest {
            render: RenderRequest {
                store_id: Some(s.id),
                ..Default::default()
            },
            to: vec!["store@comet.it".into()],
            cc: vec![],
        };
        let link = mailto_link(&pool, t.id, &req, "http://x").await.unwrap();
        assert!(link.uri.starts_with("mailto:store@comet.it?subject=Visita%20Comet%20Bologna%20-%20"));
        assert_eq!(link.subject, "Visita Comet Bologna - ");

        let bad = MailtoRequest { to: vec!["nope".into()], ..req.clone() };
        assert_eq!(
            mailto_link(&pool, t.id, &bad, "http://x").await.unwrap_err().code,
            shared::ErrorCode::ValidationFailed
        );

        let missing = RenderRequest {
            store_id: Some(404),
            ..Default::default()
        };
        assert_eq!(
            render_template(&pool, t.id, &missing, "").await.unwrap_err().code,
            ErrorCode::StoreNotFound
        );
        assert_eq!(
            render_template(&pool, 1, &RenderRequest::default(), "").await.unwrap_err().code,
            ErrorCode::TemplateNotFound
        );
    }

    #[tokio::test]
    async fn test_send_without_mailer_is_rejected() {
        let pool = crate::db::test_pool().await;
        let t = seed_template(&pool).await;
        let req = SendEmailRequest {
            render: RenderRequest::default(),
            to: vec!["a@b.it".into()],
            cc: vec![],
        };
        let err = send_email(&pool, None, t.id, &req, "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailNotConfigured);
        assert!(email::find_log(&pool, 10).await.unwrap().is_empty());
    }

    fn mailer(url: &str, key: Option<&str>) -> EmailFunctionClient {
        let mut config = crate::core::Config::with_overrides("/tmp/fieldops-mailer", 0);
        config.email_function_url = Some(url.into());
        config.email_function_key = key.map(str::to_string);
        EmailFunctionClient::from_config(&config).unwrap().unwrap()
    }

    /// Local stand-in for the email function: accepts only `Bearer secret`
    async fn spawn_email_function() -> String {
        use axum::{Router, http::HeaderMap, http::StatusCode, routing::post};

        let app = Router::new().route(
            "/send",
            post(|headers: HeaderMap| async move {
                let authorized = headers
                    .get(http::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    == Some("Bearer secret");
                if authorized { StatusCode::OK } else { StatusCode::UNAUTHORIZED }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/send")
    }

    fn send_request(store_id: i64) -> SendEmailRequest {
        SendEmailRequest {
            render: RenderRequest {
                store_id: Some(store_id),
                ..Default::default()
            },
            to: vec!["store@comet.it".into()],
            cc: vec!["area@fieldops.it".into()],
        }
    }

    #[tokio::test]
    async fn test_unreachable_function_logs_failed_attempt() {
        let pool = crate::db::test_pool().await;
        let s = seed_store(&pool, "Comet Bologna", StoreCategory::White, Chain::Comet).await;
        let t = seed_template(&pool).await;
        let client = mailer("http://127.0.0.1:1/send", None);

        let err = send_email(&pool, Some(&client), t.id, &send_request(s.id), "")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailSendFailed);

        let log = email::find_log(&pool, 10).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].status, EmailStatus::Failed);
        assert_eq!(log[0].template_id, Some(t.id));
        assert_eq!(log[0].recipients, "store@comet.it,area@fieldops.it");
        assert_eq!(log[0].subject, "Visita Comet Bologna - ");
        assert_eq!(log[0].error.as_deref(), Some(err.message.as_str()));
    }

    #[tokio::test]
    async fn test_send_logs_sent_and_rejected_attempts() {
        let pool = crate::db::test_pool().await;
        let s = seed_store(&pool, "Comet Bologna", StoreCategory::White, Chain::Comet).await;
        let t = seed_template(&pool).await;
        let url = spawn_email_function().await;

        let sent = send_email(&pool, Some(&mailer(&url, Some("secret"))), t.id, &send_request(s.id), "")
            .await
            .unwrap();
        assert_eq!(sent.status, EmailStatus::Sent);
        assert!(sent.error.is_none());

        let err = send_email(&pool, Some(&mailer(&url, Some("wrong"))), t.id, &send_request(s.id), "")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailSendFailed);
        assert!(err.message.contains("401"));

        let log = email::find_log(&pool, 10).await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().filter(|l| l.status == EmailStatus::Sent).count(), 1);
        let failed = log.iter().find(|l| l.status == EmailStatus::Failed).unwrap();
        assert!(failed.error.as_deref().unwrap().contains("401"));
    }
}
