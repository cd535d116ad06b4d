//! Service layer tests against a mock backend.

mod common;

use folio_core::blog::{BlogDraft, BlogStatus, LikeTarget, PublishedQuery};
use folio_core::profile::{ReadingResource, SocialLinks};
use folio_core::{ApiError, CredentialStore, Credentials, MemoryStore, StorageKey};
use folio_http::{OtpPurpose, ProfileAsset};
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string_contains, header, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{api_path, client_for, signed_in_store, stored};

fn blog_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": "Lifetimes in practice",
        "slug": "lifetimes-in-practice",
        "content": "<p>...</p>",
        "topic": "rust",
        "status": status,
        "views": 12
    })
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_login_sends_credentials_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .and(body_json(json!({"email": "ada@example.com", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "OTP sent to your email"
        })))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let client = client_for(&server, &store);

    let message = client
        .auth()
        .login(&Credentials::new("ada@example.com", "hunter22"))
        .await
        .unwrap();
    assert_eq!(message.as_deref(), Some("OTP sent to your email"));
}

#[tokio::test]
async fn test_login_rejection_is_not_a_session_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/refresh-token")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let err = client
        .auth()
        .login(&Credentials::new("ada@example.com", "wrong"))
        .await
        .unwrap_err();
    assert!(!err.is_session_expired());
    assert_eq!(err.message(), "Invalid email or password");
    assert_eq!(stored(&store, StorageKey::RefreshToken).as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_register_returns_registered_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/register")))
        .and(body_json(json!({
            "name": "Ada",
            "user_name": "ada",
            "email": "ada@example.com",
            "password": "hunter22"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"email": "ada@example.com"}
        })))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let client = client_for(&server, &store);

    let email = client
        .auth()
        .register("Ada", "ada", "ada@example.com", "hunter22")
        .await
        .unwrap();
    assert_eq!(email, "ada@example.com");
}

#[tokio::test]
async fn test_login_otp_stores_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/admin/auth/signin/verify-otp")))
        .and(body_json(json!({"email": "ada@example.com", "otp": "123456", "type": "login"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Login successful",
            "data": {
                "accessToken": "A1",
                "refreshToken": "R1",
                "user": {"_id": "u1", "name": "Ada", "email": "ada@example.com"}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/admin/blogs")))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let client = client_for(&server, &store);

    let outcome = client
        .auth()
        .verify_otp("ada@example.com", "123456", OtpPurpose::Login)
        .await
        .unwrap();
    assert!(outcome.signed_in);
    assert_eq!(stored(&store, StorageKey::AccessToken).as_deref(), Some("A1"));
    assert_eq!(stored(&store, StorageKey::RefreshToken).as_deref(), Some("R1"));
    assert_eq!(
        client.session().user().unwrap().unwrap()["name"],
        json!("Ada")
    );

    client.blogs().list().await.unwrap();
}

#[tokio::test]
async fn test_reset_otp_returns_reset_token_without_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/admin/password/reset/verify")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"resetToken": "rt-1"}
        })))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let client = client_for(&server, &store);

    let outcome = client
        .auth()
        .verify_otp("ada@example.com", "abc123", OtpPurpose::ResetPassword)
        .await
        .unwrap();
    assert!(!outcome.signed_in);
    assert_eq!(outcome.reset_token.as_deref(), Some("rt-1"));
    assert_eq!(stored(&store, StorageKey::AccessToken), None);
}

#[tokio::test]
async fn test_short_otp_is_rejected_locally() {
    let server = MockServer::start().await;
    let store = MemoryStore::new();
    let client = client_for(&server, &store);

    let err = client
        .auth()
        .verify_otp("ada@example.com", "12345", OtpPurpose::Register)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resend_uses_purpose_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/otp/resend")))
        .and(body_json(json!({"email": "ada@example.com", "type": "reset-password"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let client = client_for(&server, &store);
    client
        .auth()
        .resend_otp("ada@example.com", OtpPurpose::ResetPassword)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/admin-auth/signin/logout")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let err = client.auth().logout().await.unwrap_err();
    assert_eq!(err.message(), "boom");
    for key in StorageKey::ALL {
        assert_eq!(stored(&store, key), None);
    }
}

// ============================================================================
// Blogs
// ============================================================================

#[tokio::test]
async fn test_list_published_passes_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/admin/blogs/read")))
        .and(query_param("page", "2"))
        .and(query_param("topic", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"blogs": [blog_json("b1", "published")]}
        })))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let query = PublishedQuery {
        page: Some(2),
        topic: Some("rust".to_string()),
        ..Default::default()
    };
    let blogs = client.blogs().list_published(&query).await.unwrap();
    assert_eq!(blogs.len(), 1);
    assert_eq!(blogs[0].views, 12);
}

#[tokio::test]
async fn test_create_validates_before_sending() {
    let server = MockServer::start().await;
    let store = signed_in_store();
    let client = client_for(&server, &store);

    let draft = BlogDraft {
        title: Some("No body".to_string()),
        ..Default::default()
    };
    let err = client.blogs().create(&draft).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_status_patches_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(api_path("/admin/blogs/b1/status")))
        .and(body_json(json!({"status": "archived"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": blog_json("b1", "archived")
        })))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let blog = client
        .blogs()
        .set_status("b1", BlogStatus::Archived)
        .await
        .unwrap();
    assert_eq!(blog.status, BlogStatus::Archived);
}

#[tokio::test]
async fn test_get_by_slug_unwraps_nested_blog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/admin/blogs/read/lifetimes-in-practice")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"blog": blog_json("b1", "published")}
        })))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let blog = client
        .blogs()
        .get_by_slug("lifetimes-in-practice")
        .await
        .unwrap();
    assert_eq!(blog.id, "b1");
}

// ============================================================================
// Comments, likes, analytics
// ============================================================================

#[tokio::test]
async fn test_comment_and_like_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/comments")))
        .and(body_json(json!({"blog": "b1", "content": "Nice post"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"_id": "c1", "blog": "b1", "content": "Nice post"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/likes/toggle")))
        .and(body_json(json!({"target": "c1", "targetType": "comment"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"liked": true})))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let comment = client.comments().create("b1", "  Nice post ").await.unwrap();
    assert_eq!(comment.id, "c1");

    let toggled = client
        .likes()
        .toggle(LikeTarget::Comment, "c1")
        .await
        .unwrap();
    assert_eq!(toggled["liked"], json!(true));
}

#[tokio::test]
async fn test_dashboard_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/admin/blogs/stats")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "overview": {"totalBlogs": 3, "publishedBlogs": 2, "totalViews": 40},
                "trending": [blog_json("b1", "published")]
            }
        })))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let stats = client.analytics().dashboard().await.unwrap();
    assert_eq!(stats.overview.total_blogs, 3);
    assert_eq!(stats.overview.total_views, 40);
    assert_eq!(stats.trending.len(), 1);
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_sections_are_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(api_path("/admin/profile/update/social-media")))
        .and(body_json(json!({"socialMedia": {"github": "https://github.com/ada"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(api_path("/admin/profile/update/reading-resources")))
        .and(body_json(json!({"readingResources": [
            {"title": "The Book", "url": "https://doc.rust-lang.org/book"}
        ]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let mut links = SocialLinks::new();
    links.insert("github".to_string(), "github.com/ada".to_string());
    client.profile().set_social_media(&links).await.unwrap();

    let resources = vec![ReadingResource {
        title: " The Book ".to_string(),
        url: "doc.rust-lang.org/book".to_string(),
    }];
    client
        .profile()
        .set_reading_resources(&resources)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_profile_update_refreshes_cached_user() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(api_path("/admin/profile/update/quote")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(api_path("/admin/profile/update/social-media")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = signed_in_store();
    store
        .set(StorageKey::UserData, r#"{"name":"Ada","quote":"old"}"#)
        .unwrap();
    let client = client_for(&server, &store);

    client.profile().update_quote("new").await.unwrap();
    assert_eq!(
        client.session().user().unwrap(),
        Some(json!({"name": "Ada", "quote": "new"}))
    );

    let mut links = SocialLinks::new();
    links.insert("github".to_string(), "github.com/ada".to_string());
    client.profile().set_social_media(&links).await.unwrap_err();
    assert!(client.session().user().unwrap().unwrap().get("social_media").is_none());
}

#[tokio::test]
async fn test_profile_update_without_cached_user_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(api_path("/admin/profile/update/hobbies")))
        .and(body_json(json!({"hobbies": ["chess", "running"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let hobbies = vec![" chess".to_string(), "running ".to_string()];
    client.profile().set_hobbies(&hobbies).await.unwrap();
    assert!(!store.contains(StorageKey::UserData));
}

#[tokio::test]
async fn test_long_quote_is_rejected_locally() {
    let server = MockServer::start().await;
    let store = signed_in_store();
    let client = client_for(&server, &store);

    let quote = "x".repeat(201);
    let err = client.profile().update_quote(&quote).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_blog_image_upload_sends_form_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/admin/blogs/upload-image")))
        .and(header("authorization", "Bearer A1"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains(r#"name="image"; filename="cover.png""#))
        .and(body_string_contains("PNGDATA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "imageUrl": "https://cdn.example.com/cover.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let url = client
        .blogs()
        .upload_image("cover.png", "image/png", b"PNGDATA".to_vec())
        .await
        .unwrap();
    assert_eq!(url, "https://cdn.example.com/cover.png");
}

#[tokio::test]
async fn test_upload_retried_after_refresh_keeps_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/admin/blogs/upload-image")))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/refresh-token")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"accessToken": "A2"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/admin/blogs/upload-image")))
        .and(header("authorization", "Bearer A2"))
        .and(body_string_contains("JPEGDATA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"url": "https://cdn.example.com/a.jpg"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);

    let url = client
        .blogs()
        .upload_image("a.jpg", "image/jpeg", b"JPEGDATA".to_vec())
        .await
        .unwrap();
    assert_eq!(url, "https://cdn.example.com/a.jpg");
}

#[tokio::test]
async fn test_profile_resume_upload_updates_cached_user() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(api_path("/admin/profile/resume")))
        .and(body_string_contains(r#"name="resume"; filename="cv.pdf""#))
        .and(body_string_contains("application/pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": {"resume": {"url": "https://cdn.example.com/cv.pdf", "public_id": "cv"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = signed_in_store();
    store.set(StorageKey::UserData, r#"{"name":"Ada"}"#).unwrap();
    let client = client_for(&server, &store);

    let url = client
        .profile()
        .upload(ProfileAsset::Resume, "cv.pdf", "application/pdf", b"%PDF-1.7".to_vec())
        .await
        .unwrap();
    assert_eq!(url, "https://cdn.example.com/cv.pdf");
    assert_eq!(
        client.session().user().unwrap(),
        Some(json!({"name": "Ada", "resume": "https://cdn.example.com/cv.pdf"}))
    );
}

#[tokio::test]
async fn test_upload_of_unaccepted_type_never_leaves_client() {
    let server = MockServer::start().await;
    let store = signed_in_store();
    let client = client_for(&server, &store);

    let err = client
        .profile()
        .upload(ProfileAsset::Banner, "cv.pdf", "application/pdf", b"%PDF".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
