use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json,
};

use crate::{
    error::{validation::parse_item_id, AppError, AppResult},
    middleware::validation::sanitize_for_logging,
    state::AppState,
    types::{ImageSource, Item, ItemsResponse, MessageResponse, NewItem, NewItemForm},
};

/// `POST /items` accepts both urlencoded and multipart bodies.
///
/// In a multipart body the `image` field is either a file part (uploaded
/// bytes) or a plain text part holding a server-local path, the same as the
/// urlencoded form.
impl<S> FromRequest<S> for NewItem
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<NewItemForm>::from_request(req, state).await?;
            return NewItem::from(form).validate();
        }

        let mut multipart = Multipart::from_request(req, state).await?;
        let mut item = NewItem {
            name: String::new(),
            category: String::new(),
            image: None,
        };
        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or_default().to_string();
            match field_name.as_str() {
                "name" => item.name = field.text().await?,
                "category" => item.category = field.text().await?,
                "image" => {
                    if let Some(file_name) = field.file_name().map(str::to_string) {
                        let bytes = field.bytes().await?;
                        // Browsers send an empty, nameless part when no file was picked
                        if !bytes.is_empty() {
                            item.image = Some(ImageSource::Upload {
                                file_name,
                                bytes: bytes.to_vec(),
                            });
                        }
                    } else {
                        let path = field.text().await?;
                        if !path.trim().is_empty() {
                            item.image = Some(ImageSource::LocalPath(path));
                        }
                    }
                }
                other => tracing::debug!("Ignoring unknown form field: {}", sanitize_for_logging(other)),
            }
        }
        item.validate()
    }
}

pub async fn add_item(State(state): State<AppState>, item: NewItem) -> AppResult<Json<MessageResponse>> {
    tracing::info!(
        "Receive item: {}, {}, {}",
        sanitize_for_logging(&item.name),
        sanitize_for_logging(&item.category),
        sanitize_for_logging(item.image.as_ref().map(ImageSource::reference).unwrap_or(""))
    );
    let message = item.confirmation();
    let NewItem { name, category, image } = item;

    let stored_image = match image {
        Some(source) => {
            let bytes = match source {
                ImageSource::LocalPath(path) => state.images.read_source(&path).await?,
                ImageSource::Upload { bytes, .. } => bytes,
            };
            let file_name = state.images.save(bytes).await?;
            state.metrics.inc_images_stored();
            Some(file_name)
        }
        None => None,
    };

    let id = state.items.insert(&name, &category, stored_image.as_deref()).await?;
    state.metrics.inc_items_created();
    tracing::info!(item_id = id, image = ?stored_image, "Stored item");

    Ok(Json(MessageResponse::new(message)))
}

pub async fn get_items(State(state): State<AppState>) -> AppResult<Json<ItemsResponse>> {
    let items = state.items.list_all().await?;
    Ok(Json(ItemsResponse { items }))
}

pub async fn get_item(State(state): State<AppState>, Path(raw_id): Path<String>) -> AppResult<Json<Item>> {
    let id = parse_item_id(&raw_id)?;
    let item = state.items.get_by_id(id).await?;
    Ok(Json(item))
}
