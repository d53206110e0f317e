//! Unit tests for the Twilio SMS service

use pn_core::services::verification::{MessageEncoding, OutboundSms};
use pn_shared::TwilioSettings;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::sms::twilio::describe_error;
use crate::sms::{SmsService, TwilioSmsService};
use crate::InfrastructureError;

use super::plain_message;

fn settings(api_base: &str) -> TwilioSettings {
    TwilioSettings {
        account_sid: "ACtest_account_sid".to_string(),
        auth_token: "test_auth_token".to_string(),
        from_number: "+15005550006".to_string(),
        api_base: api_base.to_string(),
        request_timeout_secs: 5,
    }
}

/// Answers a single HTTP request and hands back what was received
async fn one_shot_server(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&received).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let lower = line.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if received.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&received).to_string()
    });

    (base, handle)
}

#[test]
fn test_missing_credentials_rejected() {
    let mut config = settings("https://api.twilio.com/2010-04-01");
    config.auth_token = String::new();

    match TwilioSmsService::new(config) {
        Err(InfrastructureError::Config(msg)) => assert!(msg.contains("auth token")),
        Err(other) => panic!("Expected Config error, got {:?}", other),
        Ok(_) => panic!("Expected Config error"),
    }
}

#[test]
fn test_from_number_must_be_e164() {
    let mut config = settings("https://api.twilio.com/2010-04-01");
    config.from_number = "15005550006".to_string();

    assert!(matches!(
        TwilioSmsService::new(config),
        Err(InfrastructureError::Config(_))
    ));
}

#[test]
fn test_messages_url() {
    let service = TwilioSmsService::new(settings("https://api.twilio.com/2010-04-01/")).unwrap();
    assert_eq!(
        service.messages_url(),
        "https://api.twilio.com/2010-04-01/Accounts/ACtest_account_sid/Messages.json"
    );
    assert_eq!(service.provider_name(), "Twilio");
}

#[test]
fn test_build_form_gsm7() {
    let service = TwilioSmsService::new(settings("https://api.twilio.com/2010-04-01")).unwrap();
    let form = service.build_form("+36301234567", &plain_message("Accept: abc"));

    assert_eq!(
        form,
        vec![
            ("To", "+36301234567".to_string()),
            ("From", "+15005550006".to_string()),
            ("Body", "Accept: abc".to_string()),
            ("SmartEncoded", "true".to_string()),
        ]
    );
}

#[test]
fn test_build_form_ucs2_is_sent_as_is() {
    let service = TwilioSmsService::new(settings("https://api.twilio.com/2010-04-01")).unwrap();
    let message = OutboundSms {
        body: "Megerősítés: abc".to_string(),
        encoding: MessageEncoding::Ucs2,
        flash: true,
    };
    let form = service.build_form("+36301234567", &message);

    assert_eq!(form.len(), 3);
    assert!(form.iter().all(|(name, _)| *name != "SmartEncoded"));
}

#[test]
fn test_describe_error() {
    assert_eq!(
        describe_error(400, r#"{"code": 21211, "message": "Invalid 'To' Phone Number"}"#),
        "Twilio error 21211 (HTTP 400): Invalid 'To' Phone Number"
    );
    assert_eq!(
        describe_error(401, r#"{"message": "Authenticate"}"#),
        "Twilio error (HTTP 401): Authenticate"
    );
    assert_eq!(describe_error(502, "<html>"), "Twilio error (HTTP 502)");
}

#[tokio::test]
async fn test_send_returns_message_sid() {
    let (base, server) = one_shot_server(
        "HTTP/1.1 201 Created",
        r#"{"sid": "SM0123456789abcdef", "status": "queued"}"#,
    )
    .await;
    let service = TwilioSmsService::new(settings(&base)).unwrap();

    let sid = service
        .send_sms("+36301234567", &plain_message("Accept: abc"))
        .await
        .unwrap();
    assert_eq!(sid, "SM0123456789abcdef");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /Accounts/ACtest_account_sid/Messages.json"));
    assert!(request.to_ascii_lowercase().contains("authorization: basic "));
    assert!(request.contains("To=%2B36301234567"));
    assert!(request.contains("SmartEncoded=true"));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let (base, server) = one_shot_server(
        "HTTP/1.1 400 Bad Request",
        r#"{"code": 21211, "message": "Invalid 'To' Phone Number"}"#,
    )
    .await;
    let service = TwilioSmsService::new(settings(&base)).unwrap();

    let result = service
        .send_sms("+36301234567", &plain_message("Accept: abc"))
        .await;

    match result {
        Err(InfrastructureError::Sms(msg)) => assert!(msg.contains("21211")),
        other => panic!("Expected Sms error, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_invalid_destination_never_reaches_api() {
    let service = TwilioSmsService::new(settings("http://127.0.0.1:9")).unwrap();
    let result = service.send_sms("0630 123 4567", &plain_message("x")).await;

    match result {
        Err(InfrastructureError::Sms(msg)) => assert!(msg.contains("Invalid phone number")),
        other => panic!("Expected Sms error, got {:?}", other),
    }
}
