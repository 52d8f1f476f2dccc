use docstore::collection::FindOptions;
use docstore::doc;
use docstore::errors::ErrorKind;
use docstore::filter::all;
use docstore_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_second_wrapper_for_same_name_fails() {
    run_test(
        || create_test_context(),
        |ctx| {
            let _users = ctx.db().collection("users")?;

            let result = ctx.db().collection("users");
            assert!(result.is_err());
            assert_eq!(result.err().unwrap().kind(), &ErrorKind::Configuration);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_collection_names_reflect_backing_store() {
    run_test(
        || create_test_context(),
        |ctx| {
            ctx.db().collection("users")?;
            ctx.db().collection("sessions")?;

            let names = ctx.db().collection_names()?;
            assert!(names.contains("users"));
            assert!(names.contains("sessions"));
            assert!(ctx.db().has_collection("users")?);
            assert!(!ctx.db().has_collection("ghosts")?);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_drop_collection_discards_data_and_frees_name() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.db().collection("users")?;
            users.create_one(doc! { name: "alice" })?;

            ctx.db().drop_collection("users")?;
            assert!(!ctx.db().has_collection("users")?);

            // a new wrapper under the same name starts over
            let users = ctx.db().collection("users")?;
            assert_eq!(users.count(all(), &FindOptions::default())?, 0);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_stores_are_isolated() {
    run_test(
        || create_test_context(),
        |ctx| {
            let other = create_test_context()?;

            let users = ctx.db().collection("users")?;
            users.create_one(doc! { name: "alice" })?;

            // the same name on another store is both constructible and empty
            let other_users = other.db().collection("users")?;
            assert_eq!(other_users.count(all(), &FindOptions::default())?, 0);

            cleanup(other)?;
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_operations_after_close_fail() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.db().collection("users")?;
            ctx.db().close()?;

            let result = users.create_one(doc! { name: "alice" });
            assert!(result.is_err());
            assert_eq!(result.err().unwrap().kind(), &ErrorKind::InvalidOperation);
            assert!(ctx.db().is_closed()?);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}
