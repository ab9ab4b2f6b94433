use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec};

const HOUR: i64 = 3_600_000;

struct Client {
    framed: Framed<TcpStream, LinesCodec>,
}

impl Client {
    async fn connect(host: &str, port: u16) -> Self {
        let socket = TcpStream::connect((host, port))
            .await
            .expect("connect failed");
        Self {
            framed: Framed::new(socket, LinesCodec::new()),
        }
    }

    async fn book(&mut self, building: &str, room: &str, start: i64, end: i64) -> bool {
        let line = json!({
            "op": "book",
            "building": building,
            "room": room,
            "requester": "bench",
            "start": start,
            "end": end,
        })
        .to_string();
        self.framed.send(line).await.expect("send failed");
        let response = self
            .framed
            .next()
            .await
            .expect("connection closed")
            .expect("recv failed");
        let value: Value = serde_json::from_str(&response).expect("bad response");
        value["status"] == "ok"
    }

    async fn bookings(&mut self, building: &str, room: &str) {
        let line = json!({"op": "bookings", "building": building, "room": room}).to_string();
        self.framed.send(line).await.expect("send failed");
        self.framed
            .next()
            .await
            .expect("connection closed")
            .expect("recv failed");
    }
}

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.2}ms, p50={:.2}ms, p95={:.2}ms, p99={:.2}ms, max={:.2}ms",
        latencies.len(),
        avg.as_secs_f64() * 1000.0,
        percentile(latencies, 50.0).as_secs_f64() * 1000.0,
        percentile(latencies, 95.0).as_secs_f64() * 1000.0,
        percentile(latencies, 99.0).as_secs_f64() * 1000.0,
        latencies.last().unwrap().as_secs_f64() * 1000.0,
    );
}

/// Span base unique enough that reruns against a long-lived server rarely
/// collide with earlier bench bookings.
fn span_base() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis() as i64
}

const ROOMS: [(&str, &str); 12] = [
    ("CECS", "501"),
    ("CECS", "502"),
    ("CECS", "503"),
    ("GZB", "301"),
    ("GZB", "302"),
    ("GZB", "303"),
    ("ABB", "101"),
    ("ABB", "102"),
    ("ABB", "103"),
    ("HEB", "101"),
    ("HEB", "102"),
    ("HEB", "103"),
];

async fn phase1_sequential(host: &str, port: u16, base: i64) {
    let mut client = Client::connect(host, port).await;

    let n = 2000;
    let mut admitted = 0usize;
    let mut latencies = Vec::with_capacity(n);
    let start = Instant::now();

    for i in 0..n {
        let s = base + (i as i64) * HOUR;
        let t = Instant::now();
        if client.book("CECS", "501", s, s + HOUR).await {
            admitted += 1;
        }
        latencies.push(t.elapsed());
    }

    let elapsed = start.elapsed();
    let ops = n as f64 / elapsed.as_secs_f64();
    println!(
        "  {n} requests ({admitted} admitted) in {:.2}s = {ops:.0} ops/sec",
        elapsed.as_secs_f64()
    );
    print_latency("write latency", &mut latencies);
}

async fn phase2_parallel_rooms(host: &str, port: u16, base: i64) {
    let n_per_room = 200;

    let start = Instant::now();
    let mut handles = Vec::new();

    for (building, room) in ROOMS {
        let host = host.to_string();
        handles.push(tokio::spawn(async move {
            let mut client = Client::connect(&host, port).await;
            let mut admitted = 0usize;
            for j in 0..n_per_room {
                let s = base + (j as i64) * HOUR;
                if client.book(building, room, s, s + HOUR).await {
                    admitted += 1;
                }
            }
            admitted
        }));
    }

    let mut admitted = 0usize;
    for h in handles {
        admitted += h.await.unwrap();
    }

    let elapsed = start.elapsed();
    let total = ROOMS.len() * n_per_room;
    let ops = total as f64 / elapsed.as_secs_f64();
    println!(
        "  {} rooms x {n_per_room} requests = {total} total ({admitted} admitted) in {:.2}s = {ops:.0} ops/sec",
        ROOMS.len(),
        elapsed.as_secs_f64()
    );
}

async fn phase3_contention(host: &str, port: u16, base: i64) {
    // Every task fights for the same spans in one room; most requests lose.
    let n_tasks = 8;
    let n_per_task = 250;

    let start = Instant::now();
    let mut handles = Vec::new();

    for _ in 0..n_tasks {
        let host = host.to_string();
        handles.push(tokio::spawn(async move {
            let mut client = Client::connect(&host, port).await;
            let mut admitted = 0usize;
            for j in 0..n_per_task {
                let s = base + (j as i64) * HOUR;
                if client.book("GZB", "302", s, s + HOUR).await {
                    admitted += 1;
                }
            }
            admitted
        }));
    }

    let mut admitted = 0usize;
    for h in handles {
        admitted += h.await.unwrap();
    }

    let elapsed = start.elapsed();
    let total = n_tasks * n_per_task;
    println!(
        "  {n_tasks} tasks x {n_per_task} requests on one room: {admitted}/{total} admitted in {:.2}s",
        elapsed.as_secs_f64()
    );
}

async fn phase4_read_under_load(host: &str, port: u16, base: i64) {
    // Pre-fill the target room
    let mut setup = Client::connect(host, port).await;
    for i in 0..200i64 {
        let s = base + i * HOUR;
        setup.book("HEB", "103", s, s + HOUR).await;
    }
    drop(setup);

    // Writers keep booking other rooms in the background
    let stop = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let mut writer_handles = Vec::new();
    for w in 0..4usize {
        let host = host.to_string();
        let stop = stop.clone();
        writer_handles.push(tokio::spawn(async move {
            let mut client = Client::connect(&host, port).await;
            let (building, room) = ROOMS[w];
            let mut i = 0i64;
            while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                let s = base + (100_000 + i) * HOUR;
                client.book(building, room, s, s + HOUR).await;
                i += 1;
            }
        }));
    }

    // Readers measure listing latency on the pre-filled room
    let n_readers = 8;
    let reads_per_reader = 500;
    let mut reader_handles = Vec::new();

    for _ in 0..n_readers {
        let host = host.to_string();
        reader_handles.push(tokio::spawn(async move {
            let mut client = Client::connect(&host, port).await;
            let mut latencies = Vec::with_capacity(reads_per_reader);
            for _ in 0..reads_per_reader {
                let t = Instant::now();
                client.bookings("HEB", "103").await;
                latencies.push(t.elapsed());
            }
            latencies
        }));
    }

    let mut all_latencies = Vec::new();
    for h in reader_handles {
        all_latencies.extend(h.await.unwrap());
    }

    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    for h in writer_handles {
        let _ = h.await;
    }

    print_latency("listing query", &mut all_latencies);
}

#[tokio::main]
async fn main() {
    let host = std::env::var("ATRIUM_HOST").unwrap_or_else(|_| "127.0.0.1".into());
    let port: u16 = std::env::var("ATRIUM_PORT")
        .unwrap_or_else(|_| "7474".into())
        .parse()
        .expect("invalid ATRIUM_PORT");

    println!("=== atrium stress benchmark ===");
    println!("target: {host}:{port} (default campus catalog assumed)\n");

    // Phases book disjoint span regions so they don't conflict with each
    // other (or with a recent earlier run against the same server).
    let base = span_base();

    println!("[phase 1] sequential write throughput");
    phase1_sequential(&host, port, base).await;

    println!("\n[phase 2] parallel writes across rooms");
    phase2_parallel_rooms(&host, port, base + 10_000 * HOUR).await;

    println!("\n[phase 3] single-room contention");
    phase3_contention(&host, port, base + 20_000 * HOUR).await;

    println!("\n[phase 4] read latency under write load");
    phase4_read_under_load(&host, port, base + 30_000 * HOUR).await;

    println!("\n=== benchmark complete ===");
}
