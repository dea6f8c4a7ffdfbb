//! 库存面板处理器（HTML）

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::warn;

use super::{
    model::{parse_product_id, ListQuery, Notice, ProductForm},
    service::ProductService,
    views::{self, FormMode},
};
use crate::core::error::{CoreError, PanelError};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(product_service: ProductService) -> Self {
        Self { product_service }
    }
}

fn to_listing(notice: Notice) -> Redirect {
    Redirect::to(&format!("/panel/products?notice={}", notice.as_str()))
}

pub async fn home() -> &'static str {
    "Gestio - Inventory Panel"
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, PanelError> {
    let search = query.search();
    let rows = state.product_service.list(search).await?;
    Ok(Html(views::product_list(
        &rows,
        state.product_service.threshold(),
        search,
        query.notice(),
    )))
}

pub async fn new_product_form() -> Html<String> {
    Html(views::product_form(FormMode::Create, &ProductForm::default(), &[]))
}

pub async fn create_product(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response, PanelError> {
    let product = match form.parse() {
        Ok(product) => product,
        Err(errors) => {
            warn!("Rejected product form: {}", errors.join(" "));
            let page = views::product_form(FormMode::Create, &form, &errors);
            return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
        }
    };

    state.product_service.create(product).await?;
    Ok(to_listing(Notice::Created).into_response())
}

pub async fn edit_product_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, PanelError> {
    let id = parse_product_id(&raw_id)?;
    let row = state.product_service.get(id).await?;
    let form = ProductForm::from_product(&row.product);
    Ok(Html(views::product_form(FormMode::Edit(id), &form, &[])))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response, PanelError> {
    let id = parse_product_id(&raw_id)?;
    let changes = match form.parse() {
        Ok(changes) => changes,
        Err(errors) => {
            warn!("Rejected edit form for {}: {}", id, errors.join(" "));
            let page = views::product_form(FormMode::Edit(id), &form, &errors);
            return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
        }
    };

    state.product_service.update(id, changes).await?;
    Ok(to_listing(Notice::Updated).into_response())
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Redirect, PanelError> {
    let id = match parse_product_id(&raw_id) {
        Ok(id) => id,
        Err(_) => return Ok(to_listing(Notice::NotFound)),
    };
    match state.product_service.delete(id).await {
        Ok(()) => Ok(to_listing(Notice::Deleted)),
        Err(CoreError::NotFound(_)) => Ok(to_listing(Notice::NotFound)),
        Err(e) => Err(e.into()),
    }
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, PanelError> {
    let dashboard = state.product_service.dashboard().await?;
    Ok(Html(views::dashboard(&dashboard)))
}

pub async fn alerts(State(state): State<AppState>) -> Result<Html<String>, PanelError> {
    let products = state.product_service.alerts().await?;
    Ok(Html(views::alerts(&products, state.product_service.threshold())))
}
