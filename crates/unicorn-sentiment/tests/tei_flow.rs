use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use unicorn_sentiment::{
    BackendState, FinancialBackendConfig, FinancialClassifier, FinancialProvider,
    GeneralBackendConfig, GeneralProvider, SentimentConfig, SentimentError, SentimentScorer,
    TeiClassifierConfig, TeiFinancialClassifier,
};

const FINBERT_INFO: &str = r#"{"model_id":"ProsusAI/finbert","model_type":{"classifier":{"id2label":{"0":"positive","1":"negative","2":"neutral"}}}}"#;
const EMBEDDER_INFO: &str = r#"{"model_id":"BAAI/bge-small-en","model_type":{"embedding":{"pooling":"cls"}}}"#;

fn reserve_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("reserve addr");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr.to_string()
}

/// Minimal classification server. Texts mentioning "loss" are negative,
/// "crash" answers 500, everything else is positive. Predict bodies are
/// forwarded to the returned receiver.
fn spawn_mock_server(info: &'static str) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock");
    let addr = listener.local_addr().expect("local addr").to_string();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let (head, body) = read_request(&mut stream);
            let (status, payload) = if head.starts_with("GET /info") {
                ("200 OK", info.to_string())
            } else if head.starts_with("POST /predict") {
                let _ = tx.send(body.clone());
                if body.contains("crash") {
                    ("500 Internal Server Error", r#"{"error":"model crashed"}"#.to_string())
                } else if body.contains("loss") {
                    (
                        "200 OK",
                        r#"[{"label":"negative","score":0.8},{"label":"neutral","score":0.15},{"label":"positive","score":0.05}]"#
                            .to_string(),
                    )
                } else {
                    (
                        "200 OK",
                        r#"[[{"label":"positive","score":0.9},{"label":"neutral","score":0.1},{"label":"negative","score":0.0}]]"#
                            .to_string(),
                    )
                }
            } else {
                ("404 Not Found", "{}".to_string())
            };
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                payload.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });
    (addr, rx)
}

/// Serves `/info` and then never answers `/predict`.
fn spawn_stalling_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stalling");
    let addr = listener.local_addr().expect("local addr").to_string();
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            std::thread::spawn(move || {
                let (head, _body) = read_request(&mut stream);
                if head.starts_with("GET /info") {
                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{FINBERT_INFO}",
                        FINBERT_INFO.len()
                    );
                    let _ = stream.write_all(response.as_bytes());
                    let _ = stream.flush();
                } else {
                    std::thread::sleep(Duration::from_secs(30));
                }
            });
        }
    });
    addr
}

fn financial_only(endpoint: String, timeout_secs: u64) -> SentimentConfig {
    SentimentConfig {
        financial: FinancialBackendConfig {
            endpoint: Some(endpoint),
            timeout_secs,
            ..FinancialBackendConfig::default()
        },
        general: GeneralBackendConfig {
            provider: GeneralProvider::Disabled,
            lexicon_path: None,
        },
    }
}

fn read_request(stream: &mut TcpStream) -> (String, String) {
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout");
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut chunk).expect("read request");
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..header_end.min(buf.len())]).to_string();
    let content_length = head
        .lines()
        .find_map(|l| {
            let (name, value) = l.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).expect("read body");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end.min(buf.len())..]).to_string();
    (head, body)
}

fn endpoint(addr: &str) -> String {
    format!("http://{addr}")
}

#[test]
fn classifier_connects_and_scores_by_label() {
    let (addr, _rx) = spawn_mock_server(FINBERT_INFO);
    let classifier =
        TeiFinancialClassifier::connect(TeiClassifierConfig::new(endpoint(&addr))).expect("connect");
    assert_eq!(classifier.model_id(), Some("ProsusAI/finbert"));

    let positive = classifier.classify("record revenue").expect("classify");
    assert!((positive.polarity() - 0.975).abs() < 1e-9);

    let negative = classifier.classify("another quarterly loss").expect("classify");
    assert!((negative.polarity() - 0.1625).abs() < 1e-9);
}

#[test]
fn long_inputs_are_truncated_before_sending() {
    let (addr, rx) = spawn_mock_server(FINBERT_INFO);
    let mut cfg = TeiClassifierConfig::new(format!("{}/", endpoint(&addr)));
    cfg.max_input_chars = 5;
    let classifier = TeiFinancialClassifier::connect(cfg).expect("connect");

    classifier.classify("abcdefghij").expect("classify");
    let body = rx.recv_timeout(Duration::from_secs(5)).expect("predict body");
    let sent: serde_json::Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(sent["inputs"], "abcde");
    assert_eq!(sent["truncate"], true);
}

#[test]
fn non_classifier_server_is_rejected() {
    let (addr, _rx) = spawn_mock_server(EMBEDDER_INFO);
    let err = TeiFinancialClassifier::connect(TeiClassifierConfig::new(endpoint(&addr)));
    assert!(err.is_err());
}

#[test]
fn scorer_degrades_on_call_failure_and_unreachable_server() {
    let (addr, _rx) = spawn_mock_server(FINBERT_INFO);
    let cfg = SentimentConfig {
        financial: FinancialBackendConfig {
            endpoint: Some(endpoint(&addr)),
            ..FinancialBackendConfig::default()
        },
        general: GeneralBackendConfig {
            provider: GeneralProvider::Disabled,
            lexicon_path: None,
        },
    };
    let scorer = SentimentScorer::from_config(&cfg);
    assert!(scorer.has_financial());
    assert!(!scorer.has_general());
    // a 500 falls back to keywords for that text only
    assert_eq!(scorer.financial_polarity(Some("model crash, strong demand")), 1.0);
    assert!(scorer.has_financial());
    assert!((scorer.financial_polarity(Some("record revenue")) - 0.975).abs() < 1e-9);

    let unreachable = SentimentConfig {
        financial: FinancialBackendConfig {
            provider: FinancialProvider::Tei,
            endpoint: Some(endpoint(&reserve_addr())),
            timeout_secs: 2,
            ..FinancialBackendConfig::default()
        },
        ..SentimentConfig::default()
    };
    let scorer = SentimentScorer::from_config(&unreachable);
    assert!(matches!(scorer.financial(), BackendState::Unavailable(_)));
    // keyword fallback: "strong" positive, "loss" negative
    assert!((scorer.financial_polarity(Some("strong despite loss")) - 0.6).abs() < 1e-12);
}

#[test]
fn stalled_server_costs_one_timeout_then_falls_back() {
    let addr = spawn_stalling_server();
    let scorer = SentimentScorer::from_config(&financial_only(endpoint(&addr), 1));
    assert!(scorer.has_financial());

    let texts = [
        "strong quarter",
        "efficient burn",
        "risky market",
        "declining churn",
        "profitable unit economics",
        "innovative product",
    ];
    let started = Instant::now();
    let scores: Vec<f64> = texts
        .iter()
        .map(|t| scorer.financial_polarity(Some(t)))
        .collect();
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_secs(4), "took {elapsed:?}");
    assert!(!scorer.has_financial());
    assert!(scorer.financial_disabled_reason().is_some());
    assert_eq!(scores, vec![1.0, 1.0, 0.2, 0.2, 1.0, 1.0]);
}

#[test]
fn async_callers_get_an_error_instead_of_a_panic() {
    let (addr, _rx) = spawn_mock_server(FINBERT_INFO);
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("test runtime");

    let inside = rt.block_on(async {
        TeiFinancialClassifier::connect(TeiClassifierConfig::new(endpoint(&addr)))
    });
    assert!(matches!(inside, Err(SentimentError::AsyncContext)));

    let scorer_inside = rt.block_on(async {
        SentimentScorer::from_config(&financial_only(endpoint(&addr), 2))
    });
    assert!(!scorer_inside.has_financial());

    let classifier =
        TeiFinancialClassifier::connect(TeiClassifierConfig::new(endpoint(&addr))).expect("connect");
    let call = rt.block_on(async { classifier.classify("record revenue") });
    assert!(matches!(call, Err(SentimentError::AsyncContext)));
    rt.block_on(async move { drop(classifier) });

    let scorer = SentimentScorer::from_config(&financial_only(endpoint(&addr), 2));
    assert!(scorer.has_financial());
    let polarity = rt.block_on(async { scorer.financial_polarity(Some("strong growth")) });
    assert_eq!(polarity, 1.0);
    assert!(!scorer.has_financial());
}
