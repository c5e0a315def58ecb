mod model;

use proc_macro::TokenStream;

/// Derive macro that implements `storefront_engine::Model` for a struct.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Model)]
/// #[model(collection = "stores")]
/// pub struct StoreRecord {
///     #[model(id)]
///     pub merchant_id: String,
///     pub template_id: String,
/// }
/// ```
///
/// - `#[model(collection = "...")]` names the collection. When omitted, the
///   collection is the snake_case struct name with an `s` suffix.
/// - `#[model(id)]` marks the `String` field used as the storage key. When
///   omitted, a field named `id` is used.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input)
}
