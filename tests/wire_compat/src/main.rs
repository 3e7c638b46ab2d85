fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire contract tests.");
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use base64::{Engine, engine::general_purpose::STANDARD};
    use chrono::Utc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;
    use tokio_util::sync::CancellationToken;
    use xxhash_rust::xxh3::xxh3_64;

    use modelport_api_client::{ApiClient, ClientConfig};
    use modelport_protocol::SocketPairing;
    use modelport_push_socket::{
        ReaderSource, SocketUploader, UploadError, VecSource, write_and_digest,
    };
    use modelport_stream_cipher::StreamDecryptor;

    const ZERO_KEY: [u8; 32] = [0u8; 32];
    const ZERO_NONCE: [u8; 12] = [0u8; 12];

    /// Accepts one connection and returns everything the peer sends.
    async fn spawn_sink() -> (SocketAddr, JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut wire = Vec::new();
            sock.read_to_end(&mut wire).await.unwrap();
            wire
        });
        (addr, handle)
    }

    fn pairing_for(addr: SocketAddr, key: &[u8], nonce: &[u8], auth: &[u8]) -> SocketPairing {
        SocketPairing {
            host: addr.ip().to_string(),
            port: addr.port(),
            encryption_key: STANDARD.encode(key),
            nonce: STANDARD.encode(nonce),
            authentication_header: STANDARD.encode(auth),
            upload_id: "upl_test".into(),
            expires_at: Utc::now() + chrono::Duration::minutes(5),
        }
    }

    fn decrypt(key: &[u8], nonce: &[u8], wire: &[u8]) -> Vec<u8> {
        let mut dec = StreamDecryptor::from_pairing(key, nonce).unwrap();
        dec.encrypt(wire)
    }

    // --- Socket wire contract ---

    #[tokio::test]
    async fn wire_carries_encrypted_header_then_body() {
        let (addr, sink) = spawn_sink().await;
        let pairing = pairing_for(addr, &ZERO_KEY, &ZERO_NONCE, b"AUTH");

        let source = VecSource::new([b"hello".to_vec(), b"world".to_vec()]);
        let mut uploader = SocketUploader::connect(&pairing, source).await.unwrap();

        let mut yielded = Vec::new();
        while let Some(chunk) = uploader.next_chunk().await.unwrap() {
            yielded.extend(chunk);
        }
        assert_eq!(yielded, b"helloworld");

        let wire = sink.await.unwrap();
        assert_eq!(wire.len(), b"AUTHhelloworld".len());
        assert_eq!(decrypt(&ZERO_KEY, &ZERO_NONCE, &wire), b"AUTHhelloworld");
    }

    #[tokio::test]
    async fn write_and_digest_hashes_body_only() {
        let (addr, sink) = spawn_sink().await;
        let key = [11u8; 32];
        let nonce = [13u8; 12];
        let pairing = pairing_for(addr, &key, &nonce, b"header-bytes");

        let source = VecSource::new([b"hello".to_vec(), b"world".to_vec()]);
        let digest = write_and_digest(&pairing, source).await.unwrap();

        // The checksum covers the caller's bytes, not the auth header.
        assert_eq!(digest, format!("{:016x}", xxh3_64(b"helloworld")));

        let wire = sink.await.unwrap();
        assert_eq!(
            decrypt(&key, &nonce, &wire),
            b"header-byteshelloworld".to_vec()
        );
    }

    #[tokio::test]
    async fn file_chunk_boundaries_are_invisible_on_the_wire() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asset.bin");
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        let (addr, sink) = spawn_sink().await;
        let key = [42u8; 32];
        let nonce = [7u8; 12];
        let pairing = pairing_for(addr, &key, &nonce, b"A");

        // Deliberately awkward chunk size.
        let file = tokio::fs::File::open(&path).await.unwrap();
        let source = ReaderSource::new(file, 937);
        let mut uploader = SocketUploader::connect(&pairing, source).await.unwrap();

        let mut yielded = Vec::new();
        while let Some(chunk) = uploader.next_chunk().await.unwrap() {
            yielded.extend(chunk);
        }
        assert_eq!(yielded, data);

        let wire = sink.await.unwrap();
        let mut expected = b"A".to_vec();
        expected.extend(&data);
        assert_eq!(decrypt(&key, &nonce, &wire), expected);
    }

    #[tokio::test]
    async fn abandoned_upload_stops_at_last_yielded_chunk() {
        let (addr, sink) = spawn_sink().await;
        let pairing = pairing_for(addr, &ZERO_KEY, &ZERO_NONCE, b"AUTH");

        let chunks: Vec<Vec<u8>> = (0..5).map(|i| vec![i as u8; 100]).collect();
        let mut uploader = SocketUploader::connect(&pairing, VecSource::new(chunks.clone()))
            .await
            .unwrap();

        uploader.next_chunk().await.unwrap().unwrap();
        uploader.next_chunk().await.unwrap().unwrap();
        drop(uploader);

        // The sink sees the connection close with exactly the header and
        // the two transmitted chunks.
        let wire = sink.await.unwrap();
        let mut expected = b"AUTH".to_vec();
        expected.extend(&chunks[0]);
        expected.extend(&chunks[1]);
        assert_eq!(decrypt(&ZERO_KEY, &ZERO_NONCE, &wire), expected);
    }

    #[tokio::test]
    async fn cancellation_closes_the_connection() {
        let (addr, sink) = spawn_sink().await;
        let pairing = pairing_for(addr, &ZERO_KEY, &ZERO_NONCE, b"AUTH");

        let chunks: Vec<Vec<u8>> = (0..3).map(|i| vec![i as u8; 64]).collect();
        let cancel = CancellationToken::new();
        let mut uploader = SocketUploader::connect(&pairing, VecSource::new(chunks.clone()))
            .await
            .unwrap()
            .with_cancellation(cancel.clone());

        uploader.next_chunk().await.unwrap().unwrap();
        cancel.cancel();
        let err = uploader.next_chunk().await.unwrap_err();
        assert!(matches!(err, UploadError::Cancelled));
        drop(uploader);

        let wire = sink.await.unwrap();
        let mut expected = b"AUTH".to_vec();
        expected.extend(&chunks[0]);
        assert_eq!(decrypt(&ZERO_KEY, &ZERO_NONCE, &wire), expected);
    }

    #[tokio::test]
    async fn bad_key_length_fails_before_any_connect() {
        // Port 9 on localhost has no listener; a connect attempt would
        // fail with Connect, not Cipher.
        let addr: SocketAddr = "127.0.0.1:9".parse().unwrap();
        let pairing = pairing_for(addr, &[0u8; 16], &ZERO_NONCE, b"AUTH");

        let err = SocketUploader::connect(&pairing, VecSource::new([]))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Cipher(_)));
    }

    #[tokio::test]
    async fn malformed_base64_fails_before_any_connect() {
        let addr: SocketAddr = "127.0.0.1:9".parse().unwrap();
        let mut pairing = pairing_for(addr, &ZERO_KEY, &ZERO_NONCE, b"AUTH");
        pairing.encryption_key = "%%%not-base64%%%".into();

        let err = SocketUploader::connect(&pairing, VecSource::new([]))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Pairing(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_a_connect_error() {
        // Bind then drop to get a port with no listener.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let pairing = pairing_for(addr, &ZERO_KEY, &ZERO_NONCE, b"AUTH");
        let err = SocketUploader::connect(&pairing, VecSource::new([]))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Connect(_)));
    }

    // --- Full client flows against a stubbed API ---

    /// Serves canned JSON responses, one connection per response, and
    /// captures each raw request.
    async fn spawn_api_stub(
        responses: Vec<(&'static str, String)>,
    ) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut sock, _) = listener.accept().await.unwrap();
                let request = read_request(&mut sock).await;
                let _ = tx.send(request);

                let head = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                    body.len()
                );
                sock.write_all(head.as_bytes()).await.unwrap();
                sock.write_all(body.as_bytes()).await.unwrap();
                sock.flush().await.unwrap();
            }
        });

        (format!("http://{addr}/"), rx)
    }

    async fn read_request(sock: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut tmp = [0u8; 1024];
        loop {
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
            let n = sock.read(&mut tmp).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&tmp[..n]);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn upload_asset_flow_pairs_streams_and_completes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.bin");
        let data: Vec<u8> = (0..5_000u32).map(|i| (i % 241) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        let (addr, sink) = spawn_sink().await;
        let key = [21u8; 32];
        let nonce = [22u8; 12];
        let pairing = pairing_for(addr, &key, &nonce, b"AUTH");
        let pairing_json = serde_json::to_string(&pairing).unwrap();

        let (base_url, mut requests) =
            spawn_api_stub(vec![("200 OK", pairing_json), ("200 OK", String::new())]).await;
        let api = ApiClient::with_config(ClientConfig {
            base_url,
            ..ClientConfig::default()
        })
        .unwrap();

        let checksum =
            modelport_client::upload_model_asset(&api, "tok", "model_1", "weights", &path)
                .await
                .unwrap();
        assert_eq!(checksum, format!("{:016x}", xxh3_64(&data)));

        let wire = sink.await.unwrap();
        let mut expected = b"AUTH".to_vec();
        expected.extend(&data);
        assert_eq!(decrypt(&key, &nonce, &wire), expected);

        let pair_request = requests.recv().await.unwrap();
        assert!(pair_request.starts_with("POST /file-push/socket/pair/asset HTTP/1.1"));
        assert!(pair_request.contains("\"modelId\":\"model_1\""));

        let complete_request = requests.recv().await.unwrap();
        assert!(complete_request.starts_with("POST /file-push/socket/complete HTTP/1.1"));
        assert!(complete_request.contains(&format!("\"checksum\":\"{checksum}\"")));
        assert!(complete_request.contains("\"uploadId\":\"upl_test\""));
    }

    #[tokio::test]
    async fn download_asset_flow_writes_destination_file() {
        // ASCII payload; the stub serves string bodies.
        let body: Vec<u8> = (0..3_000u32).map(|i| b'a' + (i % 26) as u8).collect();

        let (base_url, mut requests) = spawn_api_stub(vec![(
            "200 OK",
            String::from_utf8(body.clone()).unwrap(),
        )])
        .await;
        let api = ApiClient::with_config(ClientConfig {
            base_url,
            ..ClientConfig::default()
        })
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("asset.out");
        let written = modelport_client::download_model_asset(
            &api, "tok", "acc_1", "model_1", "asset_1", &dest,
        )
        .await
        .unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), body);

        let request = requests.recv().await.unwrap();
        assert!(request.starts_with("GET /retrieve/asset/acc_1/model_1/asset_1 HTTP/1.1"));
    }
}
