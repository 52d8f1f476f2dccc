use crate::collection::Document;
use crate::errors::DocStoreResult;

/// Trait implemented by types that can live in a typed repository.
///
/// An entity maps itself to and from a [Document] and names the collection
/// its repository is backed by. Mapping failures should use the
/// `ObjectMapping` error kind.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::collection::Document;
/// use docstore::errors::{DocStoreError, DocStoreResult, ErrorKind};
/// use docstore::repository::Entity;
///
/// pub struct User {
///     pub username: String,
/// }
///
/// impl Entity for User {
///     fn collection_name() -> String {
///         "users".to_string()
///     }
///
///     fn to_document(&self) -> DocStoreResult<Document> {
///         let mut doc = Document::new();
///         doc.put("username", self.username.as_str())?;
///         Ok(doc)
///     }
///
///     fn from_document(document: &Document) -> DocStoreResult<Self> {
///         let username = document.get("username").as_str().map(String::from).ok_or_else(|| {
///             DocStoreError::new("User is missing 'username'", ErrorKind::ObjectMapping)
///         })?;
///         Ok(User { username })
///     }
/// }
/// ```
pub trait Entity: Sized {
    /// Returns the name of the collection backing this entity type.
    fn collection_name() -> String;

    /// Maps this entity to a document payload.
    fn to_document(&self) -> DocStoreResult<Document>;

    /// Maps a stored document back to an entity.
    fn from_document(document: &Document) -> DocStoreResult<Self>;
}
