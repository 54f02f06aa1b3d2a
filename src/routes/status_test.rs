use super::*;
use crate::state::test_helpers;

#[tokio::test]
async fn status_reflects_indicators() {
    let state = test_helpers::test_app_state();
    let Json(idle) = get_status(State(state.clone())).await;
    assert_eq!(idle, StatusResponse { loading: false, navigating: false, configured: false });

    let _guard = state.ui.loading.begin();
    let Json(busy) = get_status(State(state.clone())).await;
    assert!(busy.loading);
}

#[tokio::test]
async fn set_navigating_round_trips() {
    let state = test_helpers::test_app_state();
    let Json(on) = set_navigating(State(state.clone()), Json(NavigatingRequest { value: true })).await;
    assert!(on.navigating);
    let Json(off) = set_navigating(State(state.clone()), Json(NavigatingRequest { value: false })).await;
    assert!(!off.navigating);
    assert!(!state.ui.navigating.get());
}
