use anyhow::Result;

use super::AssemblyAi;

impl AssemblyAi {
    fn with_url(url: String) -> AssemblyAi {
        return AssemblyAi {
            url,
            token: "abc".to_string(),
            poll_interval: "10".to_string(),
            poll_attempts: "3".to_string(),
        };
    }
}

#[tokio::test]
async fn it_transcribes_audio() -> Result<()> {
    let mut server = mockito::Server::new();
    let upload_mock = server
        .mock("POST", "/v2/upload")
        .with_status(200)
        .with_body("{\"upload_url\": \"https://cdn.example/audio-1\"}")
        .create();
    let create_mock = server
        .mock("POST", "/v2/transcript")
        .with_status(200)
        .with_body("{\"id\": \"transcript-1\", \"status\": \"queued\"}")
        .create();
    let poll_mock = server
        .mock("GET", "/v2/transcript/transcript-1")
        .with_status(200)
        .with_body(
            "{\"id\": \"transcript-1\", \"status\": \"completed\", \"text\": \"I would use a hashmap\"}",
        )
        .create();

    let transcriber = AssemblyAi::with_url(server.url());
    let text = transcriber.transcribe(vec![0, 1, 2, 3]).await?;

    assert_eq!(text, "I would use a hashmap");
    upload_mock.assert();
    create_mock.assert();
    poll_mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_failed_transcripts() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v2/upload")
        .with_status(200)
        .with_body("{\"upload_url\": \"https://cdn.example/audio-1\"}")
        .create();
    server
        .mock("POST", "/v2/transcript")
        .with_status(200)
        .with_body("{\"id\": \"transcript-1\", \"status\": \"queued\"}")
        .create();
    server
        .mock("GET", "/v2/transcript/transcript-1")
        .with_status(200)
        .with_body("{\"id\": \"transcript-1\", \"status\": \"error\", \"error\": \"bad audio\"}")
        .create();

    let transcriber = AssemblyAi::with_url(server.url());
    let res = transcriber.transcribe(vec![0]).await;

    assert!(res.is_err());
    assert!(res
        .unwrap_err()
        .to_string()
        .contains("Transcription failed: bad audio"));
}

#[tokio::test]
async fn it_bounds_the_status_poll() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v2/upload")
        .with_status(200)
        .with_body("{\"upload_url\": \"https://cdn.example/audio-1\"}")
        .create();
    server
        .mock("POST", "/v2/transcript")
        .with_status(200)
        .with_body("{\"id\": \"transcript-1\", \"status\": \"queued\"}")
        .create();
    let poll_mock = server
        .mock("GET", "/v2/transcript/transcript-1")
        .with_status(200)
        .with_body("{\"id\": \"transcript-1\", \"status\": \"processing\"}")
        .expect(3)
        .create();

    let transcriber = AssemblyAi::with_url(server.url());
    let res = transcriber.transcribe(vec![0]).await;

    assert!(res.is_err());
    assert_eq!(res.unwrap_err().to_string(), "Transcription timed out.");
    poll_mock.assert();
}
