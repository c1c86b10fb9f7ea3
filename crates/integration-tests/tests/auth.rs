//! Login and account creation against the user table.

use threads_integration_tests::{TestContext, USERS_HEADER, USERS_WITH_ALICE};

#[tokio::test]
async fn test_login_success_opens_browse() {
    let mut ctx = TestContext::new();
    ctx.submit("/front", &[("action", "sign_in")]).await;

    let page = ctx
        .submit(
            "/login",
            &[("action", "sign_in"), ("username", "alice"), ("password", "pw1")],
        )
        .await;
    assert!(page.body.contains("Browse Page"));
    assert!(page.body.contains("Signed in as alice"));
    assert!(page.body.contains("Logout"));
}

#[tokio::test]
async fn test_login_wrong_password_stays_on_login() {
    let mut ctx = TestContext::new();
    ctx.submit("/front", &[("action", "sign_in")]).await;

    let page = ctx
        .submit(
            "/login",
            &[("action", "sign_in"), ("username", "alice"), ("password", "wrong")],
        )
        .await;
    assert!(page.body.contains("Login Page"));
    assert!(
        page.body
            .contains("Authentication failed. Please check your username and password.")
    );

    // The notice is shown once
    let page = ctx.get("/").await;
    assert!(page.body.contains("Login Page"));
    assert!(!page.body.contains("Authentication failed."));
}

#[tokio::test]
async fn test_login_is_case_sensitive() {
    let mut ctx = TestContext::new();
    ctx.submit("/front", &[("action", "sign_in")]).await;

    let page = ctx
        .submit(
            "/login",
            &[("action", "sign_in"), ("username", "Alice"), ("password", "pw1")],
        )
        .await;
    assert!(page.body.contains("Login Page"));
}

#[tokio::test]
async fn test_login_without_user_table_shows_error() {
    let mut ctx = TestContext::with_tables(None, None);
    ctx.submit("/front", &[("action", "sign_in")]).await;

    let page = ctx
        .submit(
            "/login",
            &[("action", "sign_in"), ("username", "alice"), ("password", "pw1")],
        )
        .await;
    assert!(page.body.contains("Login Page"));
    assert!(page.body.contains("not found."));
}

#[tokio::test]
async fn test_logout_returns_to_front() {
    let mut ctx = TestContext::new();
    ctx.submit("/front", &[("action", "sign_in")]).await;
    ctx.submit(
        "/login",
        &[("action", "sign_in"), ("username", "alice"), ("password", "pw1")],
    )
    .await;

    let page = ctx.submit("/browse", &[("nav", "logout")]).await;
    assert!(page.body.contains("Welcome to Threads in the Matrix"));

    // Signing back in is required to see the member menu again
    ctx.submit("/front", &[("action", "sign_in")]).await;
    let page = ctx.get("/").await;
    assert!(page.body.contains("Login Page"));
}

#[tokio::test]
async fn test_signup_without_terms_leaves_table_unchanged() {
    let mut ctx = TestContext::new();
    ctx.submit("/front", &[("action", "sign_up")]).await;

    let page = ctx
        .submit(
            "/signup",
            &[
                ("action", "create_account"),
                ("username", "bob"),
                ("password", "pw2"),
            ],
        )
        .await;
    assert!(page.body.contains("Sign Up Page"));
    assert!(page.body.contains("be created unless you agree to the terms."));
    assert_eq!(ctx.users_csv(), USERS_WITH_ALICE);
}

#[tokio::test]
async fn test_signup_appends_row_and_shows_success_page() {
    let mut ctx = TestContext::new();
    ctx.submit("/front", &[("action", "sign_up")]).await;

    let page = ctx
        .post(
            "/signup",
            &[
                ("action", "create_account"),
                ("username", "bob"),
                ("password", "pw2"),
                ("phone", "555-0199"),
                ("waist", "30"),
                ("bust", "38.5"),
                ("hip", ""),
                ("terms", "on"),
            ],
        )
        .await;
    assert!(page.status.is_success());
    assert!(page.body.contains("Account created successfully!"));
    assert!(page.body.contains(r#"content="2;url=/""#));

    assert_eq!(
        ctx.users_csv(),
        format!("{USERS_WITH_ALICE}bob,pw2,555-0199,30.0,38.5,0.0\n")
    );

    // The refresh lands on the front page and the new account can sign in
    let page = ctx.get("/").await;
    assert!(page.body.contains("Welcome to Threads in the Matrix"));
    ctx.submit("/front", &[("action", "sign_in")]).await;
    let page = ctx
        .submit(
            "/login",
            &[("action", "sign_in"), ("username", "bob"), ("password", "pw2")],
        )
        .await;
    assert!(page.body.contains("Signed in as bob"));
}

#[tokio::test]
async fn test_signup_creates_missing_user_table() {
    let mut ctx = TestContext::with_tables(None, None);
    ctx.submit("/front", &[("action", "sign_up")]).await;

    let page = ctx
        .post(
            "/signup",
            &[
                ("action", "create_account"),
                ("username", "carol"),
                ("password", "pw3"),
                ("terms", "on"),
            ],
        )
        .await;
    assert!(page.status.is_success());
    assert_eq!(
        ctx.users_csv(),
        format!("{USERS_HEADER}\ncarol,pw3,,0.0,0.0,0.0\n")
    );
}

#[tokio::test]
async fn test_duplicate_usernames_accumulate() {
    let mut ctx = TestContext::new();

    for _ in 0..2 {
        ctx.submit("/front", &[("action", "sign_up")]).await;
        let page = ctx
            .post(
                "/signup",
                &[
                    ("action", "create_account"),
                    ("username", "alice"),
                    ("password", "other"),
                    ("terms", "on"),
                ],
            )
            .await;
        assert!(page.status.is_success());
    }

    assert_eq!(ctx.users_csv().matches("\nalice,").count(), 3);

    // The first matching row still wins
    ctx.submit("/front", &[("action", "sign_in")]).await;
    let page = ctx
        .submit(
            "/login",
            &[("action", "sign_in"), ("username", "alice"), ("password", "pw1")],
        )
        .await;
    assert!(page.body.contains("Signed in as alice"));
}
