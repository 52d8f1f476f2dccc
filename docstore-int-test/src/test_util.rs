use docstore::doc_store::DocStore;
use docstore::errors::DocStoreResult;

#[ctor::ctor]
fn init_logger() {
    colog::init();
}

/// Shared state for one integration test: a fresh in-memory database.
#[derive(Clone)]
pub struct TestContext {
    db: DocStore,
}

impl TestContext {
    pub fn db(&self) -> &DocStore {
        &self.db
    }
}

/// Opens a fresh in-memory database for a test.
pub fn create_test_context() -> DocStoreResult<TestContext> {
    let db = DocStore::builder().open()?;
    Ok(TestContext { db })
}

/// Closes the database of a test context.
pub fn cleanup(ctx: TestContext) -> DocStoreResult<()> {
    ctx.db.close()
}

/// Runs a test between a setup and a cleanup step.
///
/// Cleanup runs whether the test body returns `Ok` or `Err`; a failing body
/// is reported even when cleanup also fails.
pub fn run_test<B, T, A>(before: B, test: T, after: A)
where
    B: Fn() -> DocStoreResult<TestContext>,
    T: Fn(TestContext) -> DocStoreResult<()>,
    A: Fn(TestContext) -> DocStoreResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let result = test(ctx.clone());
    let cleanup_result = after(ctx);

    if let Err(e) = result {
        panic!("Test failed: {:?}", e);
    }
    if let Err(e) = cleanup_result {
        panic!("After run failed: {:?}", e);
    }
}
