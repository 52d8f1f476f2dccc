use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use docstore::collection::{DocId, Document, FindOptions};
use docstore::doc_store::DocStore;
use docstore::errors::{DocStoreError, DocStoreResult, ErrorKind};
use docstore::filter::field;
use docstore::repository::{Entity, ObjectRepository};

/// A registered user.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}

impl Entity for User {
    fn collection_name() -> String {
        "users".to_string()
    }

    fn to_document(&self) -> DocStoreResult<Document> {
        let mut doc = Document::new();
        doc.put("username", self.username.as_str())?;
        doc.put("password_hash", self.password_hash.as_str())?;
        Ok(doc)
    }

    fn from_document(document: &Document) -> DocStoreResult<Self> {
        let username = document
            .get("username")
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                DocStoreError::new("User is missing 'username'", ErrorKind::ObjectMapping)
            })?;
        let password_hash = document
            .get("password_hash")
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                DocStoreError::new("User is missing 'password_hash'", ErrorKind::ObjectMapping)
            })?;
        Ok(User {
            username,
            password_hash,
        })
    }
}

/// User management concept: registration and credential checks.
///
/// Usernames are unique; passwords are stored as argon2 hashes.
pub struct UserConcept {
    users: ObjectRepository<User>,
}

impl UserConcept {
    pub fn new(db: &DocStore) -> DocStoreResult<Self> {
        let users = db.repository::<User>()?;
        users.ensure_unique("username")?;
        Ok(UserConcept { users })
    }

    /// Registers a new user. Fails on empty credentials or a taken username.
    pub fn create(&self, username: &str, password: &str) -> DocStoreResult<DocId> {
        Self::assert_valid_username(username)?;
        if password.is_empty() {
            return Err(DocStoreError::new(
                "Password must be at least 1 character long",
                ErrorKind::InvalidOperation,
            ));
        }

        let user = User {
            username: username.to_string(),
            password_hash: hash_password(password)?,
        };
        self.users.insert(&user)
    }

    /// Checks a username/password pair and returns the matching user.
    pub fn authenticate(&self, username: &str, password: &str) -> DocStoreResult<User> {
        let user = self
            .users
            .find_one(field("username").eq(username), &FindOptions::default())?;

        match user {
            Some(user) if verify_password(password, &user.password_hash) => Ok(user),
            _ => Err(DocStoreError::new(
                "Username or password is incorrect",
                ErrorKind::NotFound,
            )),
        }
    }

    /// Looks up a user by username.
    pub fn get_user_by_username(&self, username: &str) -> DocStoreResult<User> {
        Self::assert_valid_username(username)?;
        self.users
            .find_one(field("username").eq(username), &FindOptions::default())?
            .ok_or_else(|| {
                DocStoreError::new(
                    &format!("User '{}' not found", username),
                    ErrorKind::NotFound,
                )
            })
    }

    fn assert_valid_username(username: &str) -> DocStoreResult<()> {
        if username.is_empty() {
            return Err(DocStoreError::new(
                "Username must be at least 1 character long",
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }
}

fn hash_password(password: &str) -> DocStoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt).map_err(|e| {
        DocStoreError::new(
            &format!("Failed to hash password: {}", e),
            ErrorKind::Internal,
        )
    })?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, expected_hash: &str) -> bool {
    match PasswordHash::new(expected_hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}
