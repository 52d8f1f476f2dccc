// doc constants
pub const DOC_ID: &str = "_id";
pub const DOC_CREATED: &str = "_created";
pub const DOC_MODIFIED: &str = "_modified";
pub const RESERVED_FIELDS: [&str; 3] = [DOC_ID, DOC_CREATED, DOC_MODIFIED];

// Compile-time assertion for reserved fields count
const _: () = {
    const RESERVED_FIELDS_COUNT: usize = 3;
    const ACTUAL_COUNT: usize = RESERVED_FIELDS.len();
    const _: [(); 1] = [(); (ACTUAL_COUNT == RESERVED_FIELDS_COUNT) as usize];
};

pub const DOCSTORE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_fields_cover_all_internal_fields() {
        assert!(RESERVED_FIELDS.contains(&DOC_ID));
        assert!(RESERVED_FIELDS.contains(&DOC_CREATED));
        assert!(RESERVED_FIELDS.contains(&DOC_MODIFIED));
    }

    #[test]
    fn version_is_set() {
        assert!(!DOCSTORE_VERSION.is_empty());
    }
}
