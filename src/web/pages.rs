//! HTML page handlers: thin controllers over the services

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Form,
};
use minijinja::context;
use serde::Deserialize;
use validator::Validate;

use crate::{
    api::TenantServices,
    error::{AppError, AppResult},
    models::{visit::PAYMENT_METHODS, Period, ReportOutcome, VisitForm, VisitRecord},
    render::text::render_registration,
    services::Services,
    AppState,
};

use super::{
    templates::render,
    views::{report_range, ClientRow, Flash, ServiceOption, SummaryView, VisitRow},
};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Deserialize)]
pub struct ReportsQuery {
    /// `week`, `month` or `all` (default)
    pub period: Option<String>,
}

/// Home page
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    render(&state.templates, "index.html", context! {})
}

async fn register_form_page(state: &AppState, services: &Services, flash: Option<Flash>) -> AppResult<Html<String>> {
    let catalog: Vec<ServiceOption> = services
        .catalog
        .list()
        .await?
        .iter()
        .map(ServiceOption::from)
        .collect();
    render(
        &state.templates,
        "register.html",
        context! { services => catalog, payment_methods => PAYMENT_METHODS, flash },
    )
}

/// Visit registration form
pub async fn new_visit(
    State(state): State<AppState>,
    TenantServices(services): TenantServices,
) -> AppResult<Html<String>> {
    register_form_page(&state, &services, None).await
}

async fn register_from_form(services: &Services, form: VisitForm) -> AppResult<VisitRecord> {
    form.validate()?;
    if !form.has_known_payment_method() {
        return Err(AppError::Validation(format!(
            "Método de pago inválido: '{}'",
            form.payment_method
        )));
    }
    let service = services.catalog.get_by_id(form.service_id).await?;
    services
        .visits
        .register(form.into_new_visit(service.name), crate::local_now())
        .await
}

/// Validate and submit the registration form
pub async fn submit_visit(
    State(state): State<AppState>,
    TenantServices(services): TenantServices,
    Form(form): Form<VisitForm>,
) -> AppResult<Html<String>> {
    let flash = match register_from_form(&services, form).await {
        Ok(record) => Flash::success(render_registration(&record)),
        Err(AppError::Validation(message)) | Err(AppError::NotFound(message)) => {
            Flash::danger(format!("⚠️ Error: {}", message))
        }
        Err(e) => return Err(e),
    };
    register_form_page(&state, &services, Some(flash)).await
}

/// Period report, or whole-data summary with every visit
pub async fn reports(
    State(state): State<AppState>,
    TenantServices(services): TenantServices,
    Query(query): Query<ReportsQuery>,
) -> AppResult<Html<String>> {
    let period = query
        .period
        .as_deref()
        .filter(|p| !p.eq_ignore_ascii_case("all"))
        .map(str::parse::<Period>)
        .transpose()
        .map_err(AppError::Validation)?;

    match period {
        Some(period) => {
            let title = format!("Reporte {}", period.label());
            match services.visits.report(period, crate::local_now()).await? {
                ReportOutcome::Report(report) => render(
                    &state.templates,
                    "reports.html",
                    context! {
                        title,
                        range => report_range(&report),
                        summary => SummaryView::from(&report.summary),
                    },
                ),
                ReportOutcome::NoData { period } => render(
                    &state.templates,
                    "reports.html",
                    context! {
                        title,
                        flash => Flash::warning(format!("⚠️ No hay datos para el período {}", period.label())),
                    },
                ),
            }
        }
        None => {
            let visits = services.visits.list().await?;
            match services.visits.summary().await? {
                Some(summary) => render(
                    &state.templates,
                    "reports.html",
                    context! {
                        title => "Reporte general",
                        summary => SummaryView::from(&summary),
                        visits => visits.iter().map(VisitRow::from).collect::<Vec<_>>(),
                    },
                ),
                None => render(
                    &state.templates,
                    "index.html",
                    context! { flash => Flash::warning("⚠️ No hay datos para generar reportes") },
                ),
            }
        }
    }
}

/// Client directory with visit frequency estimates
pub async fn clients(
    State(state): State<AppState>,
    TenantServices(services): TenantServices,
) -> AppResult<Html<String>> {
    let clients: Vec<ClientRow> = services.clients.list().await?.iter().map(ClientRow::from).collect();
    render(&state.templates, "clients.html", context! { clients })
}

/// Download the two-sheet spreadsheet
pub async fn export_xlsx(
    State(state): State<AppState>,
    TenantServices(services): TenantServices,
) -> AppResult<Response> {
    match services.visits.spreadsheet().await? {
        Some(bytes) => Ok((
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"reporte_barberia.xlsx\"",
                ),
            ],
            bytes,
        )
            .into_response()),
        None => Ok(render(
            &state.templates,
            "index.html",
            context! { flash => Flash::warning("⚠️ No hay datos para exportar") },
        )?
        .into_response()),
    }
}
