use super::*;

#[test]
fn state_without_pool_reports_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());
    assert!(matches!(state.db(), Err(ApiError::Unavailable)));
}

#[tokio::test]
async fn state_with_pool_hands_it_out() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_lazy_pool(dir.path());
    assert!(state.db().is_ok());
}

#[test]
fn svg_store_is_rooted_at_configured_dir() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());
    assert_eq!(state.svgs.root(), dir.path().join("store"));
}
