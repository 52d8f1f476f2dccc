use docstore::collection::{DocId, FindOptions, UpdateOptions};
use docstore::common::{DOC_CREATED, DOC_ID, DOC_MODIFIED};
use docstore::doc;
use docstore::filter::{all, by_id, field};
use docstore_int_test::test_util::{cleanup, create_test_context, run_test};
use std::thread;
use std::time::Duration;

#[test]
fn test_forged_internal_fields_never_survive_create() {
    run_test(
        || create_test_context(),
        |ctx| {
            let docs = ctx.db().collection("docs")?;

            let mut payload = doc! { name: "alice" };
            let forged_id = DocId::new();
            payload.put(DOC_ID, forged_id)?;
            payload.put(DOC_CREATED, 1u64)?;
            payload.put(DOC_MODIFIED, 2u64)?;

            let id = docs.create_one(payload)?;
            assert_ne!(id, forged_id);

            let stored = docs.read_one(by_id(id), &FindOptions::default())?.unwrap();
            assert_ne!(stored.created_at(), Some(1));
            assert_ne!(stored.modified_at(), Some(2));
            assert!(docs
                .read_one(by_id(forged_id), &FindOptions::default())?
                .is_none());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_creation_stamps_are_equal() {
    run_test(
        || create_test_context(),
        |ctx| {
            let docs = ctx.db().collection("docs")?;
            let id = docs.create_one(doc! { name: "alice", age: 30 })?;

            let stored = docs.read_one(by_id(id), &FindOptions::default())?.unwrap();
            assert_eq!(stored.created_at(), stored.modified_at());
            // payload fields survive untouched
            assert_eq!(stored.get("name"), "alice".into());
            assert_eq!(stored.get("age"), 30.into());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_partial_update_touches_only_named_fields_and_modified() {
    run_test(
        || create_test_context(),
        |ctx| {
            let docs = ctx.db().collection("docs")?;
            let id = docs.create_one(doc! { name: "alice", age: 30, city: "NYC" })?;
            let before = docs.read_one(by_id(id), &FindOptions::default())?.unwrap();

            thread::sleep(Duration::from_millis(5));
            docs.update_one(by_id(id), doc! { age: 31 }, &UpdateOptions::default())?;

            let after = docs.read_one(by_id(id), &FindOptions::default())?.unwrap();
            assert_eq!(after.get("age"), 31.into());
            assert_eq!(after.get("name"), "alice".into());
            assert_eq!(after.get("city"), "NYC".into());
            assert_eq!(after.created_at(), before.created_at());
            assert!(after.modified_at() > before.modified_at());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

// Pins the replace/update asymmetry: replace strips the payload but does not
// re-stamp, so a replaced document keeps its id and nothing else.
#[test]
fn test_replace_one_drops_timestamps() {
    run_test(
        || create_test_context(),
        |ctx| {
            let docs = ctx.db().collection("docs")?;
            let id = docs.create_one(doc! { name: "alice" })?;

            let mut replacement = doc! { name: "Alice" };
            replacement.put(DOC_CREATED, 42u64)?;
            replacement.put(DOC_MODIFIED, 43u64)?;
            docs.replace_one(by_id(id), replacement, &UpdateOptions::default())?;

            let stored = docs.read_one(by_id(id), &FindOptions::default())?.unwrap();
            assert_eq!(stored.doc_id(), Some(id));
            assert_eq!(stored.get("name"), "Alice".into());
            assert!(stored.created_at().is_none());
            assert!(stored.modified_at().is_none());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_delete_one_decrements_count_by_one() {
    run_test(
        || create_test_context(),
        |ctx| {
            let docs = ctx.db().collection("docs")?;
            docs.create_one(doc! { kind: "x" })?;
            docs.create_one(doc! { kind: "x" })?;
            let before = docs.count(field("kind").eq("x"), &FindOptions::default())?;

            docs.delete_one(field("kind").eq("x"))?;

            let after = docs.count(field("kind").eq("x"), &FindOptions::default())?;
            assert_eq!(after, before - 1);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_pop_one_on_no_match_leaves_count_unchanged() {
    run_test(
        || create_test_context(),
        |ctx| {
            let docs = ctx.db().collection("docs")?;
            docs.create_one(doc! { kind: "x" })?;
            let before = docs.count(all(), &FindOptions::default())?;

            assert!(docs.pop_one(field("kind").eq("ghost"))?.is_none());

            assert_eq!(docs.count(all(), &FindOptions::default())?, before);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_alice_scenario() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.db().collection("users")?;

            let id = users.create_one(doc! { name: "alice" })?;
            let stored = users.read_one(by_id(id), &FindOptions::default())?.unwrap();
            let t = stored.created_at().expect("created stamp");
            assert_eq!(stored.modified_at(), Some(t));
            assert_eq!(stored.get("name"), "alice".into());

            thread::sleep(Duration::from_millis(5));
            users.update_one(by_id(id), doc! { name: "Alice" }, &UpdateOptions::default())?;

            let updated = users.read_one(by_id(id), &FindOptions::default())?.unwrap();
            assert_eq!(updated.get("name"), "Alice".into());
            assert_eq!(updated.created_at(), Some(t));
            assert!(updated.modified_at().expect("modified stamp") > t);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}
