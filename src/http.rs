//! HTTP surface: the public site renderer and the admin JSON API.
//!
//! The public side is a fallback handler that classifies every path through
//! the routing state machine and either redirects to a language-prefixed
//! location or renders a page with its resolved SEO head. The admin side is
//! a bearer-token-gated JSON API under `/admin/api` covering content CRUD,
//! reordering, settings, translation, diagnostics and the audit trail.

use crate::audit::{module_for_collection, AuditAction, AuditLogger, AuditModule, AuditedStore};
use crate::config::Config;
use crate::content::{BlogPost, PostStatus, TeamMember};
use crate::i18n::{Language, LocalizedString};
use crate::ordering::{list_ordered, next_order, persist_order};
use crate::routing::{classify, Page, RouteDecision};
use crate::security::constant_time_compare;
use crate::seo::{route_metadata, static_routes, SeoMetadata};
use crate::settings::SettingsService;
use crate::sitemap::{build_sitemap, published_post_slugs, team_slugs};
use crate::store::{collections, DocumentStore, StoreError};
use crate::{diagnostics, translation};
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Content collections exposed through the generic CRUD endpoints.
/// Settings singletons and audit logs have their own endpoints.
const CONTENT_COLLECTIONS: &[&str] = &[
    collections::PROJECTS,
    collections::SERVICES,
    collections::TEAM_MEMBERS,
    collections::TESTIMONIALS,
    collections::FAQS,
    collections::JOBS,
    collections::BLOG_POSTS,
    collections::USERS,
];

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: DocumentStore,
    pub settings: SettingsService,
    pub audit: AuditLogger,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config, store: DocumentStore) -> anyhow::Result<Self> {
        let settings = SettingsService::new(&store)?;
        let audit = AuditLogger::new(store.clone());
        Ok(Self {
            config: Arc::new(config),
            store,
            settings,
            audit,
            client: reqwest::Client::new(),
        })
    }

    fn audited(&self) -> AuditedStore {
        AuditedStore::new(
            self.store.clone(),
            self.audit.clone(),
            self.config.admin_email.clone(),
        )
    }
}

// ==================== Errors ====================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    // Reorder races surface here: the submitted sequence no longer matches
    // the stored collection and the caller must re-fetch.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound,
            other => ApiError::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ==================== Router ====================

pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/session", post(login).delete(logout))
        .route("/settings/:name", get(get_settings).put(put_settings))
        .route("/translate", post(translate_field))
        .route("/diagnostics", get(run_diagnostics))
        .route("/diagnostics/:collection/repair-order", post(repair_order))
        .route("/audit-logs", get(list_audit_logs))
        .route("/:collection", get(list_collection).post(create_document))
        .route("/:collection/reorder", post(reorder_collection))
        .route(
            "/:collection/:id",
            get(get_document)
                .put(put_document)
                .patch(patch_document)
                .delete(delete_document),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/sitemap.xml", get(serve_sitemap))
        .nest("/admin/api", admin)
        .fallback(public_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bearer-token gate for the admin API. The comparison is constant-time.
async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("");

    if !constant_time_compare(token, &state.config.admin_token) {
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}

// ==================== Session ====================

/// Validates the bearer token (the gate already ran) and records the login.
async fn login(State(state): State<AppState>) -> Json<Value> {
    state.audit.log(
        AuditAction::Login,
        AuditModule::Auth,
        "Admin logged in",
        state.config.admin_email.clone(),
        Value::Null,
    );
    Json(json!({ "email": state.config.admin_email }))
}

async fn logout(State(state): State<AppState>) -> StatusCode {
    state.audit.log(
        AuditAction::Logout,
        AuditModule::Auth,
        "Admin logged out",
        state.config.admin_email.clone(),
        Value::Null,
    );
    StatusCode::NO_CONTENT
}

// ==================== Content CRUD ====================

fn check_collection(collection: &str) -> Result<(), ApiError> {
    if CONTENT_COLLECTIONS.contains(&collection) {
        Ok(())
    } else {
        Err(ApiError::NotFound)
    }
}

fn document_json(doc: &crate::store::Document) -> Value {
    json!({ "id": doc.id, "createdAt": doc.created_at, "data": doc.data })
}

async fn list_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Json<Value>, ApiError> {
    check_collection(&collection)?;
    let documents = list_ordered(&state.store, &collection)?;
    Ok(Json(Value::Array(
        documents.iter().map(document_json).collect(),
    )))
}

async fn get_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    check_collection(&collection)?;
    match state.store.get(&collection, &id)? {
        Some(data) => Ok(Json(data)),
        None => Err(ApiError::NotFound),
    }
}

/// Create a record. New records without an explicit `order` are appended to
/// the end of the display sequence.
async fn create_document(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(mut data): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    check_collection(&collection)?;
    let Some(map) = data.as_object_mut() else {
        return Err(ApiError::BadRequest("document must be a JSON object".into()));
    };
    if !map.contains_key("order") {
        let len = state.store.list(&collection)?.len();
        map.insert("order".to_string(), json!(next_order(len)));
    }

    let id = state.audited().create(&collection, &data)?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn put_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(data): Json<Value>,
) -> Result<StatusCode, ApiError> {
    check_collection(&collection)?;
    state.audited().set(&collection, &id, &data)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn patch_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Result<StatusCode, ApiError> {
    check_collection(&collection)?;
    state.audited().update(&collection, &id, &patch)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    check_collection(&collection)?;
    state.audited().delete(&collection, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Reorder ====================

#[derive(Debug, Deserialize)]
struct ReorderRequest {
    ids: Vec<String>,
}

/// Persist a full drag-reorder sequence as one all-or-nothing batch.
///
/// A stale sequence (an id deleted by another operator) rejects the whole
/// batch with 409; the stored order is untouched and the client re-fetches.
async fn reorder_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(request): Json<ReorderRequest>,
) -> Result<StatusCode, ApiError> {
    check_collection(&collection)?;
    if request.ids.is_empty() {
        return Err(ApiError::BadRequest("ids must not be empty".into()));
    }

    match persist_order(&state.store, &collection, &request.ids) {
        Ok(()) => {
            if let Some(module) = module_for_collection(&collection) {
                state.audit.log(
                    AuditAction::Update,
                    module,
                    format!("Reordered {} items in {}", request.ids.len(), collection),
                    state.config.admin_email.clone(),
                    json!({ "collection": collection, "count": request.ids.len() }),
                );
            }
            Ok(StatusCode::NO_CONTENT)
        }
        Err(StoreError::NotFound { id, .. }) => Err(ApiError::Conflict(format!(
            "sequence is out of date (unknown id '{}'), re-fetch the list",
            id
        ))),
        Err(other) => Err(other.into()),
    }
}

// ==================== Settings ====================

/// Admin-facing names of the three settings singletons.
fn settings_document(name: &str) -> Option<(&'static str, &'static str)> {
    match name {
        "site" => Some((collections::SITE_SETTINGS, collections::MAIN)),
        "seo" => Some((collections::SETTINGS, collections::SEO)),
        "contact" => Some((collections::CONTACT_SETTINGS, collections::MAIN)),
        _ => None,
    }
}

async fn get_settings(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let (collection, id) = settings_document(&name).ok_or(ApiError::NotFound)?;
    let value = state.store.get(collection, id)?.unwrap_or(Value::Null);
    Ok(Json(value))
}

async fn put_settings(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(data): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let (collection, id) = settings_document(&name).ok_or(ApiError::NotFound)?;
    state.audited().set(collection, id, &data)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Translation ====================

/// Fill the missing languages of a localized field from its English value.
/// Failed targets stay empty; the response carries whatever did translate.
async fn translate_field(
    State(state): State<AppState>,
    Json(field): Json<LocalizedString>,
) -> Json<LocalizedString> {
    let filled = translation::fill_missing_languages(&state.client, &state.config, &field).await;
    Json(filled)
}

// ==================== Diagnostics ====================

async fn run_diagnostics(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let issues = diagnostics::scan(&state.store)?;
    Ok(Json(json!({ "issues": issues })))
}

async fn repair_order(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Json<Value>, ApiError> {
    check_collection(&collection)?;
    let repaired = diagnostics::repair_order(&state.store, &collection)?;
    if let Some(module) = module_for_collection(&collection) {
        state.audit.log(
            AuditAction::Update,
            module,
            format!("Reassigned order for {} items in {}", repaired, collection),
            state.config.admin_email.clone(),
            json!({ "collection": collection, "repaired": repaired }),
        );
    }
    Ok(Json(json!({ "repaired": repaired })))
}

// ==================== Audit Log ====================

#[derive(Debug, Deserialize)]
struct AuditQuery {
    limit: Option<usize>,
}

/// Newest entries first. The log is append-only; there is no write endpoint.
async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Value>, ApiError> {
    let limit = query.limit.unwrap_or(100);
    let mut documents = state.store.list(collections::AUDIT_LOGS)?;
    documents.reverse();
    documents.truncate(limit);
    Ok(Json(Value::Array(
        documents.iter().map(document_json).collect(),
    )))
}

// ==================== Sitemap ====================

async fn serve_sitemap(State(state): State<AppState>) -> Result<Response, ApiError> {
    let team = team_slugs(&state.store)?;
    let posts = published_post_slugs(&state.store)?;
    let xml = build_sitemap(&state.config.base_url, static_routes(), &team, &posts);
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    )
        .into_response())
}

// ==================== Public Pages ====================

/// Fallback handler for everything that is not the sitemap or the admin API.
async fn public_page(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let detected = Language::detect(accept_language);

    match classify(uri.path(), uri.query(), detected) {
        RouteDecision::Redirect(location) => {
            info!("Redirecting {} -> {}", uri.path(), location);
            Ok(Redirect::permanent(&location).into_response())
        }
        RouteDecision::Render { lang, page } => render_page(&state, lang, &page, uri.path()),
        RouteDecision::NotFound(lang) => Ok(not_found_page(lang)),
        RouteDecision::GlobalNotFound => Ok(not_found_page(Language::canonical())),
    }
}

fn render_page(
    state: &AppState,
    lang: Language,
    page: &Page,
    path: &str,
) -> Result<Response, ApiError> {
    let mut meta = state.settings.seo_resolver().resolve(page.route_key(), path, lang);

    // Detail pages take their title from the record itself unless an
    // explicit override already replaced it.
    let heading = match page {
        Page::Static(_) => meta.title.clone(),
        Page::TeamMember(slug) => match find_team_member(&state.store, slug)? {
            Some(member) => {
                // A resolved title still equal to the static baseline means
                // no `team_<id>` override fired; the profile then takes the
                // member's name.
                if meta.title == route_metadata("team").title {
                    meta.title = member.name.clone();
                }
                member.name
            }
            None => return Ok(not_found_page(lang)),
        },
        Page::BlogPost(slug) => match find_published_post(&state.store, slug)? {
            Some(post) => {
                let title = post.title.get(lang);
                if !title.is_empty() {
                    meta.title = title.clone();
                }
                title
            }
            None => return Ok(not_found_page(lang)),
        },
    };

    let site = state.settings.site();
    let og_image = meta
        .og_image
        .clone()
        .or_else(|| state.settings.seo().global.default_og_image.clone());

    Ok(Html(render_html(lang, &meta, og_image.as_deref(), &site.site_name, &heading)).into_response())
}

fn render_html(
    lang: Language,
    meta: &SeoMetadata,
    og_image: Option<&str>,
    site_name: &str,
    heading: &str,
) -> String {
    let mut head = String::new();
    head.push_str(&format!(
        "<title>{}{}</title>\n",
        escape_html(&meta.title),
        escape_html(&meta.title_suffix)
    ));
    if !meta.description.is_empty() {
        head.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            escape_html(&meta.description)
        ));
    }
    if !meta.keywords.is_empty() {
        head.push_str(&format!(
            "<meta name=\"keywords\" content=\"{}\">\n",
            escape_html(&meta.keywords.join(", "))
        ));
    }
    if meta.no_index == Some(true) {
        head.push_str("<meta name=\"robots\" content=\"noindex\">\n");
    }
    if let Some(image) = og_image {
        head.push_str(&format!(
            "<meta property=\"og:image\" content=\"{}\">\n",
            escape_html(image)
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n{}</head>\n<body>\n<header>{}</header>\n<h1>{}</h1>\n</body>\n</html>\n",
        lang.code(),
        head,
        escape_html(site_name),
        escape_html(heading)
    )
}

fn not_found_page(lang: Language) -> Response {
    let body = format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head><title>Page not found</title><meta name=\"robots\" content=\"noindex\"></head>\n<body><h1>404</h1></body>\n</html>\n",
        lang.code()
    );
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

fn find_team_member(store: &DocumentStore, slug: &str) -> Result<Option<TeamMember>, ApiError> {
    for doc in store.list(collections::TEAM_MEMBERS)? {
        if let Ok(member) = serde_json::from_value::<TeamMember>(doc.data) {
            if member.slug == slug {
                return Ok(Some(member));
            }
        }
    }
    Ok(None)
}

fn find_published_post(store: &DocumentStore, slug: &str) -> Result<Option<BlogPost>, ApiError> {
    for doc in store.list(collections::BLOG_POSTS)? {
        if let Ok(post) = serde_json::from_value::<BlogPost>(doc.data) {
            if post.slug == slug && post.status == PostStatus::Published {
                return Ok(Some(post));
            }
        }
    }
    Ok(None)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
