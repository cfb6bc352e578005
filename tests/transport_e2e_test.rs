use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};

use arena_view::adapter::{encode_line, run_server, Envelope, InboundEvent, Transport, ViewerConfig};
use arena_view::types::{Player, Settings, Snapshot};

fn config() -> ViewerConfig {
    ViewerConfig {
        port: 0,
        max_pending: 8,
        ..ViewerConfig::default()
    }
}

fn tick(n: u64) -> Envelope {
    Envelope::board_tick(&Snapshot {
        settings: Settings::new(800.0, 600.0),
        players: vec![Player::new(format!("p{n}"), "Ann").at(100.0, 100.0, 40.0)],
        fruits: Vec::new(),
    })
}

#[tokio::test]
async fn feeder_lines_arrive_in_order_and_garbage_is_dropped() {
    let (event_tx, mut event_rx) = mpsc::channel::<InboundEvent>(8);
    let (ready_tx, ready_rx) = oneshot::channel();

    let server = tokio::spawn(async move {
        let _ = run_server(config(), event_tx, Some(ready_tx)).await;
    });

    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");

    let mut stream = TcpStream::connect(addr).await.expect("connect failed");
    stream
        .write_all(encode_line(&tick(1)).unwrap().as_bytes())
        .await
        .unwrap();
    stream.write_all(b"not json at all\n\n").await.unwrap();
    stream
        .write_all(b"{\"event\":\"chat\",\"payload\":{\"text\":\"hi\"}}\n")
        .await
        .unwrap();
    stream
        .write_all(encode_line(&tick(2)).unwrap().as_bytes())
        .await
        .unwrap();
    stream.flush().await.unwrap();

    let mut received = Vec::new();
    for _ in 0..3 {
        let inbound = tokio::time::timeout(Duration::from_secs(2), event_rx.recv())
            .await
            .unwrap()
            .expect("expected inbound event");
        received.push(inbound);
    }

    assert!(received.iter().all(|e| e.client_id == received[0].client_id));
    assert_eq!(received[0].envelope, tick(1));
    assert_eq!(received[1].envelope.event, "chat");
    assert_eq!(received[2].envelope, tick(2));

    drop(event_rx);
    let _ = tokio::time::timeout(Duration::from_secs(2), server).await;
}

#[test]
fn transport_batches_keep_only_the_newest_tick() {
    let mut transport = Transport::start(config()).unwrap();
    let addr = transport.local_addr();

    let feeder = std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            let mut batch = String::new();
            for n in 1..=5 {
                batch.push_str(&encode_line(&tick(n)).unwrap());
            }
            stream.write_all(batch.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
        });
    });
    feeder.join().unwrap();

    // All five lines were written before we look; wait until the last one
    // has been read off the socket.
    let mut seen = Vec::new();
    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while !seen.contains(&tick(5)) && std::time::Instant::now() < deadline {
        let batch = transport
            .next_batch(Duration::from_millis(50))
            .expect("listener stopped early");
        assert!(batch.len() <= 1, "superseded ticks must be dropped");
        seen.extend(batch.into_iter().map(|e| e.envelope));
    }
    assert_eq!(seen.last(), Some(&tick(5)));
}
