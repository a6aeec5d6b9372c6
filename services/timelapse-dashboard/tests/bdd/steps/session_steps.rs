//! BDD step definitions for sign-in and sign-out

use cucumber::{given, then, when};
use timelapse_dashboard::identity::Identity;

use crate::world::{token_for, DashboardWorld};

#[given(expr = "{string} is already signed in with the identity provider")]
fn already_signed_in(world: &mut DashboardWorld, name: String) {
    world.provider_token = Some(token_for(&name));
}

#[given("nobody is signed in with the identity provider")]
fn nobody_signed_in(world: &mut DashboardWorld) {
    world.provider_token = None;
}

#[given("the identity provider holds a token without a profile")]
fn token_without_profile(world: &mut DashboardWorld) {
    world.provider_token = Some("ya29.opaque-access-token".to_string());
}

#[when("the dashboard initializes")]
async fn dashboard_initializes(world: &mut DashboardWorld) {
    if let Err(e) = world.controller().await.initialize().await {
        world.last_error = Some(e.to_string());
    }
}

#[when(expr = "{string} signs in")]
async fn user_signs_in(world: &mut DashboardWorld, name: String) {
    let identity = Identity::from_token(token_for(&name));
    if let Err(e) = world.controller().await.handle_sign_in(identity).await {
        world.last_error = Some(e.to_string());
    }
}

#[when(expr = "{string} signs in with a token")]
async fn user_signs_in_with_token(world: &mut DashboardWorld, name: String) {
    let token = token_for(&name);
    if let Err(e) = world.controller().await.sign_in(&token).await {
        world.last_error = Some(e.to_string());
    }
}

#[when("the user signs in with an empty token")]
async fn user_signs_in_with_empty_token(world: &mut DashboardWorld) {
    if let Err(e) = world.controller().await.sign_in("").await {
        world.last_error = Some(e.to_string());
    }
}

#[when("an identity without a profile signs in")]
async fn profileless_sign_in(world: &mut DashboardWorld) {
    world.view_before = Some(world.view().await);
    let identity = Identity::from_token("ya29.opaque-access-token");
    if let Err(e) = world.controller().await.handle_sign_in(identity).await {
        world.last_error = Some(e.to_string());
    }
}

#[when("the user signs out")]
async fn user_signs_out(world: &mut DashboardWorld) {
    if let Err(e) = world.controller().await.sign_out().await {
        world.last_error = Some(e.to_string());
    }
}

#[when("the user chooses an account")]
async fn user_chooses_account(world: &mut DashboardWorld) {
    if let Err(e) = world.controller().await.choose_account().await {
        world.last_error = Some(e.to_string());
    }
}

#[then("the welcome panel should be visible")]
async fn welcome_visible(world: &mut DashboardWorld) {
    let view = world.view().await;
    assert!(view.welcome_visible);
    assert!(!view.signed_in_visible);
}

#[then("the signed-in panel should be visible")]
async fn signed_in_visible(world: &mut DashboardWorld) {
    let view = world.view().await;
    assert!(view.signed_in_visible);
    assert!(!view.welcome_visible);
}

#[then("the sign-in affordance should be attached")]
async fn sign_in_attached(world: &mut DashboardWorld) {
    assert!(world.view().await.sign_in_attached);
}

#[then(expr = "the display name should be {string}")]
async fn display_name(world: &mut DashboardWorld, expected: String) {
    assert_eq!(world.view().await.display_name, expected);
}

#[then("the session should hold a token")]
async fn session_has_token(world: &mut DashboardWorld) {
    assert!(world.controller().await.session().token().is_some());
}

#[then("the session should hold no token")]
async fn session_has_no_token(world: &mut DashboardWorld) {
    assert!(world.controller().await.session().token().is_none());
}

#[then("the view should be unchanged")]
async fn view_unchanged(world: &mut DashboardWorld) {
    let before = world.view_before.clone().expect("no view snapshot taken");
    assert_eq!(world.view().await, before);
}

#[then(expr = "the operation should fail with {string}")]
fn operation_failed(world: &mut DashboardWorld, expected: String) {
    let error = world.last_error.as_ref().expect("no error recorded");
    assert!(
        error.contains(&expected),
        "Expected error to contain '{}', got '{}'",
        expected,
        error
    );
}
