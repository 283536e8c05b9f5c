//! Bundled sample suites, ported from the integration fixtures the harness
//! grew up against. Sample content: these exercise the harness and the
//! assertion helpers, they are not part of the harness itself.

use crate::asserts::*;
use crate::context::Context;
use crate::suite::Suite;

/// All-passing demonstration suites for the `quipu` binary.
pub fn sample_suites() -> Vec<Suite> {
    vec![
        Suite::new("asserts", asserts_context()),
        Suite::new("scope", scope_context()),
    ]
}

/// A sweep over the assertion helpers plus a setUp-ran check.
fn asserts_context() -> Context {
    let mut cx = Context::new();
    cx.set_up(|scope| {
        scope.set("setUpCalled", true);
        Ok(())
    });
    cx.bind("testAsserts", |_| {
        assert_that(true)?;
        assert_true(true)?;
        assert_false(false)?;
        assert_equals(1337, 1337)?;
        assert_equals("flarp", "flarp")?;
        assert_not_equals("foo", "bar")?;
        assert_not_equals(f64::NAN, f64::NAN)?;
        assert_nan(0.0 / 0.0)?;
        assert_not_nan(1337.0)?;
        assert_none::<i64>(&None)?;
        assert_some(&Some("flarp"))?;
        assert_roughly_equals(5.0, 6.0, 2.0)?;
        assert_contains(&"foo", &["bar", "foo", "baz"])?;
        Ok(())
    });
    cx.bind("testSetUpCalled", |scope| {
        assert_true(scope.get_bool("setUpCalled").unwrap_or(false))
    });
    cx
}

/// Shared-scope visibility: a fixture set by one test is seen by the next,
/// and tearDown cleans it up again.
fn scope_context() -> Context {
    let mut cx = Context::new();
    cx.bind("testStoresFixture", |scope| {
        scope.set("flarp", 1337);
        Ok(())
    });
    cx.bind("testSeesEarlierMutation", |scope| {
        assert_equals(Some(1337), scope.get_i64("flarp"))
    });
    cx.tear_down(|scope| {
        scope.remove("flarp");
        Ok(())
    });
    cx
}
