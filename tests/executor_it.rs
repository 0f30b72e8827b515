// std
use std::{
	sync::{
		Arc, Mutex,
		atomic::{AtomicBool, Ordering},
	},
	time::Duration,
};
// crates.io
use httpmock::prelude::*;
// self
use cms_courier::{
	client::Client,
	error::{Error, RequestFailure},
	model::Category,
	request::{Callback, Method},
};

fn build_client(server: &MockServer) -> Client {
	Client::builder(&server.url("/wp-json"))
		.expect("Mock base URL should parse.")
		.with_timeout(Duration::from_secs(5))
		.with_concurrency_cap(4)
		.build()
		.expect("Client should build against the mock server.")
}

#[tokio::test]
async fn category_listing_returns_success_envelope() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/wp-json/wp/v2/categories").query_param("per_page", "100");
			then.status(200).header("content-type", "application/json").body(
				r#"[{"id":1,"count":4,"name":"News","slug":"news","taxonomy":"category","parent":0},
				{"id":2,"count":1,"name":"Sports","slug":"sports","taxonomy":"category","parent":0}]"#,
			);
		})
		.await;
	let envelope = client
		.categories(|request| request.with_per_page(100).build())
		.await
		.expect("Category listing should not raise a hard fault.");

	assert!(envelope.is_success());
	assert_eq!(envelope.status_code(), 200);
	assert_eq!(envelope.value().map(Vec::len), Some(2));
	assert_eq!(envelope.value().and_then(|items| items.first()).map(|c| c.slug.as_str()), Some("news"));
	assert!(envelope.message().contains("Request success with (200) status."));
	assert_eq!(client.stats().count("categories"), 1);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn non_success_status_embeds_raw_body() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/wp-json/wp/v2/posts/404");
			then.status(404)
				.header("content-type", "application/json")
				.body(r#"{"code":"rest_post_invalid_id"}"#);
		})
		.await;

	let envelope = client
		.post(404, |request| request.build())
		.await
		.expect("Missing post should not raise a hard fault.");

	assert!(!envelope.is_success());
	assert_eq!(envelope.status_code(), 404);
	assert!(envelope.value().is_none());
	assert!(matches!(envelope.failure(), Some(RequestFailure::Status { status: 404 })));
	assert!(envelope.message().contains("Request failed with (404) status."));
	assert!(envelope.message().contains("rest_post_invalid_id"));
	assert_eq!(client.stats().count("posts"), 0);
}

#[tokio::test]
async fn short_body_boundary_is_five_bytes() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/wp-json/wp/v2/tags").query_param("page", "1");
			then.status(200).body("1234");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/wp-json/wp/v2/tags").query_param("page", "2");
			then.status(200).body("12345");
		})
		.await;

	let short = client
		.execute::<serde_json::Value>(
			client.request("tags").with_page_number(1).build().expect("URL should assemble."),
		)
		.await
		.expect("Short body should not raise a hard fault.");
	let exact = client
		.execute::<serde_json::Value>(
			client.request("tags").with_page_number(2).build().expect("URL should assemble."),
		)
		.await
		.expect("Five-byte body should not raise a hard fault.");

	assert!(!short.is_success());
	assert!(matches!(short.failure(), Some(RequestFailure::Status { status: 200 })));
	assert!(exact.is_success());
	assert_eq!(exact.value(), Some(&serde_json::json!(12345)));
}

#[tokio::test]
async fn global_preprocessor_rejection_aborts_before_local_validation() {
	let server = MockServer::start_async().await;
	let client = Client::builder(&server.url("/wp-json"))
		.expect("Mock base URL should parse.")
		.with_global_response_processor(|body| !body.contains("maintenance"))
		.build()
		.expect("Client should build against the mock server.");
	let local_ran = Arc::new(AtomicBool::new(false));
	let local_probe = local_ran.clone();

	server
		.mock_async(|when, then| {
			when.method(GET).path("/wp-json/wp/v2/posts");
			then.status(200).body(r#"{"notice":"site under maintenance"}"#);
		})
		.await;

	let envelope = client
		.posts(|request| {
			request
				.with_response_validation_override(move |_| {
					local_probe.store(true, Ordering::SeqCst);

					true
				})
				.build()
		})
		.await
		.expect("Rejected response should not raise a hard fault.");

	assert!(!envelope.is_success());
	assert!(matches!(envelope.failure(), Some(RequestFailure::Validation { .. })));
	assert!(
		envelope
			.message()
			.contains("Request aborted with (200) [Globally defined validation restricted] status.")
	);
	// The local validator never runs once the global preprocessor has rejected the body.
	assert!(!local_ran.load(Ordering::SeqCst));
	// The call still counts; statistics record traffic, not outcomes.
	assert_eq!(client.stats().count("posts"), 1);
}

#[tokio::test]
async fn local_validator_rejection_is_tagged_user_defined() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/wp-json/wp/v2/users");
			then.status(200).body("[{\"id\":1,\"name\":\"admin\"}]");
		})
		.await;

	let envelope = client
		.users(|request| request.with_response_validation_override(|_| false).build())
		.await
		.expect("Rejected response should not raise a hard fault.");

	assert!(!envelope.is_success());
	assert!(
		envelope
			.message()
			.contains("Request aborted with (200) [User defined validation restricted] status.")
	);
}

#[tokio::test]
async fn unsupported_verbs_fail_before_any_traffic() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.path("/wp-json/wp/v2/posts/7");
			then.status(200).body("{}");
		})
		.await;
	let descriptor = client
		.request("posts/7")
		.with_method(Method::Delete)
		.build()
		.expect("URL should assemble.");
	let err = client
		.execute::<serde_json::Value>(descriptor)
		.await
		.expect_err("DELETE should be rejected as unsupported.");

	assert!(matches!(err, Error::UnsupportedMethod { method: Method::Delete }));

	let descriptor = client
		.request("posts/7")
		.with_method(Method::Put)
		.build()
		.expect("URL should assemble.");
	let err = client
		.execute::<serde_json::Value>(descriptor)
		.await
		.expect_err("PUT should be rejected as unsupported.");

	assert!(matches!(err, Error::UnsupportedMethod { method: Method::Put }));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn deadline_elapsing_yields_timeout_envelope() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/wp-json/wp/v2/comments");
			then.status(200).body("[]").delay(Duration::from_secs(2));
		})
		.await;

	let envelope = client
		.comments(|request| request.with_deadline(Duration::from_millis(100)).build())
		.await
		.expect("Timeout should not raise a hard fault.");

	assert!(!envelope.is_success());
	assert_eq!(envelope.status_code(), 403);
	assert!(matches!(envelope.failure(), Some(RequestFailure::Timeout { .. })));
}

#[tokio::test]
async fn callbacks_observe_body_and_terminal_status() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let seen_body = Arc::new(Mutex::new(String::new()));
	let seen_status = Arc::new(Mutex::new(None));
	let body_probe = seen_body.clone();
	let status_probe = seen_status.clone();

	server
		.mock_async(|when, then| {
			when.method(GET).path("/wp-json/wp/v2/categories/3");
			then.status(200).body(r#"{"id":3,"name":"News","slug":"news"}"#);
		})
		.await;

	let callback = Callback::new()
		.on_response(move |body| {
			*body_probe.lock().expect("Body probe lock should not be poisoned.") = body.to_owned();
		})
		.on_status(move |status| {
			*status_probe.lock().expect("Status probe lock should not be poisoned.") =
				Some((status.ok, status.message.clone()));
		});
	let envelope = client
		.category(3, |request| request.with_callback(callback).build())
		.await
		.expect("Category fetch should not raise a hard fault.");

	assert!(envelope.is_success());
	assert_eq!(envelope.value().map(|c: &Category| c.slug.as_str()), Some("news"));
	assert!(
		seen_body.lock().expect("Body probe lock should not be poisoned.").contains("\"id\":3")
	);
	assert_eq!(
		*seen_status.lock().expect("Status probe lock should not be poisoned."),
		Some((true, "Request success with (200) status.".to_owned()))
	);
}

#[tokio::test]
async fn malformed_json_becomes_deserialize_failure() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/wp-json/wp/v2/tags/9");
			then.status(200).body(r#"{"id":"not-a-number","name":"x"}"#);
		})
		.await;

	let envelope = client
		.tag(9, |request| request.build())
		.await
		.expect("Malformed payload should not raise a hard fault.");

	assert!(!envelope.is_success());
	assert_eq!(envelope.status_code(), 200);
	assert!(matches!(envelope.failure(), Some(RequestFailure::Deserialize { .. })));
}

#[tokio::test]
async fn create_post_sends_form_body() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/wp-json/wp/v2/posts")
				.header("content-type", "application/x-www-form-urlencoded")
				.body_includes("title=Hello")
				.body_includes("content=World");
			then.status(201)
				.header("content-type", "application/json")
				.body(r#"{"id":11,"slug":"hello","status":"pending"}"#);
		})
		.await;
	let envelope = client
		.create_post(|request| {
			request
				.with_post_body(|post| post.with_title("Hello").with_content("World").build())
				.build()
		})
		.await
		.expect("Post creation should not raise a hard fault.");

	assert!(envelope.is_success());
	assert_eq!(envelope.status_code(), 201);
	assert_eq!(envelope.value().map(|post| post.id), Some(11));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn invalid_body_yields_no_descriptor() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	// Category bodies require a name; the sub-builder error surfaces as an absent descriptor.
	let err = client
		.create_category(|request| request.with_category_body(|category| category.build()).build())
		.await
		.expect_err("Missing required fields should abort before dispatch.");

	assert!(matches!(err, Error::Build(_)));
}
