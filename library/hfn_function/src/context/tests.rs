use super::*;
use pretty_assertions::assert_eq;

#[test]
fn overrides_win_over_process_env() {
    let ctx = CallContext::new().with_env("PATH", "overridden");
    assert_eq!(ctx.env_var("PATH").as_deref(), Some("overridden"));
}

#[test]
fn disabled_process_env_hides_real_variables() {
    let ctx = CallContext::new().without_process_env();
    assert_eq!(ctx.env_var("PATH"), None);

    let ctx = ctx.with_env_overrides([("A", "1"), ("B", "2")]);
    assert_eq!(ctx.env_var("B").as_deref(), Some("2"));
    assert_eq!(ctx.env_var("C"), None);
}

#[test]
fn clones_do_not_see_later_overrides() {
    let base = CallContext::new().without_process_env().with_env("A", "1");
    let derived = base.clone().with_env("A", "2");
    assert_eq!(base.env_var("A").as_deref(), Some("1"));
    assert_eq!(derived.env_var("A").as_deref(), Some("2"));
}
