use midly_serial::{
    num::{u4, u7},
    EventKind, MidiStream, Registry,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{cell::Cell, env, time::Instant};

/// Bytes per generated stream, roughly 2 minutes of a saturated 31.25 kbaud link.
const STREAM_LEN: usize = 384 * 1024;

const STREAMS: &[(&str, fn(usize) -> Vec<u8>)] = &[
    ("notes", gen_notes),
    ("running-status", gen_running_status),
    ("clocked", gen_clocked),
    ("sysex", gen_sysex),
];

/// Fixed seeds, so every run decodes the same streams.
fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn data(rng: &mut StdRng) -> u8 {
    rng.gen_range(0..0x80)
}

fn channel(rng: &mut StdRng) -> u8 {
    rng.gen_range(0..0x10)
}

/// Note on/off pairs, every message with its own status byte.
fn gen_notes(len: usize) -> Vec<u8> {
    let mut rng = seeded(1);
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        let channel = channel(&mut rng);
        let key = data(&mut rng);
        out.extend_from_slice(&[0x90 | channel, key, data(&mut rng)]);
        out.extend_from_slice(&[0x80 | channel, key, 0]);
    }
    out
}

/// Long runs of controller data sharing a single status byte.
fn gen_running_status(len: usize) -> Vec<u8> {
    let mut rng = seeded(2);
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        out.push(0xB0 | channel(&mut rng));
        for _ in 0..64 {
            out.extend_from_slice(&[data(&mut rng), data(&mut rng)]);
        }
    }
    out
}

/// Channel messages with realtime bytes spliced in between their data bytes.
fn gen_clocked(len: usize) -> Vec<u8> {
    let mut rng = seeded(3);
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        let (lsb, msb) = (data(&mut rng), data(&mut rng));
        out.extend_from_slice(&[0xE0 | channel(&mut rng), lsb, 0xF8, msb]);
        out.extend_from_slice(&[0xC0 | channel(&mut rng), 0xFE, data(&mut rng)]);
    }
    out
}

/// Mostly System Exclusive dumps, which the decoder has to skip over.
fn gen_sysex(len: usize) -> Vec<u8> {
    let mut rng = seeded(4);
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        out.push(0xF0);
        for _ in 0..128 {
            out.push(data(&mut rng));
        }
        out.extend_from_slice(&[0xF7, 0x90, data(&mut rng), data(&mut rng)]);
    }
    out
}

fn use_stream(bytes: &[u8]) {
    let round = |num: f64| (num * 100.0).round() / 100.0;

    let events = Cell::new(0u64);
    let count = |_: u4, _: u7, _: u7| events.set(events.get() + 1);
    let mut registry = Registry::new();
    for &kind in EventKind::ALL.iter() {
        registry.register(kind, Some(&count));
    }

    let runtime = || {
        events.set(0);
        let mut stream = MidiStream::new();
        let start = Instant::now();
        let fired = stream.feed(bytes, &registry);
        let time = round((start.elapsed().as_micros() as f64) / 1000.0);
        assert_eq!(fired as u64, events.get(), "dispatch count mismatch");
        (fired, time)
    };

    let (event_count, cold_time) = runtime();
    let iters = (2000.0 / cold_time.max(0.01)).floor() as u64 + 1;
    let mut total_time = 0.0;
    let mut max_time = cold_time;
    let mut min_time = cold_time;
    for _ in 0..iters {
        let (fired, time) = runtime();
        assert_eq!(fired, event_count, "decoder is not consistent with event counts");
        total_time += time;
        max_time = max_time.max(time);
        min_time = min_time.min(time);
    }
    let avg_time = round(total_time / (iters as f64));
    let megabytes = bytes.len() as f64 / (1024.0 * 1024.0);
    let mb_per_sec = round(megabytes / (avg_time.max(0.01) / 1000.0));

    eprintln!(
        "{} events in {} iters / min {} / avg {} / max {} ms ({} MB/s)",
        event_count, iters, min_time, avg_time, max_time, mb_per_sec
    );
}

fn main() {
    let stream_filter = env::args().nth(1).unwrap_or_default().to_lowercase();

    let streams = STREAMS
        .iter()
        .filter(|(name, _)| name.contains(&stream_filter))
        .collect::<Vec<_>>();
    if streams.is_empty() {
        eprintln!("no streams match the pattern \"{}\"", stream_filter);
        eprint!("available streams: ");
        for (i, (name, _)) in STREAMS.iter().enumerate() {
            if i > 0 {
                eprint!(", ");
            }
            eprint!("{}", name);
        }
        eprintln!();
        return;
    }

    for &(name, generate) in streams {
        let bytes = generate(STREAM_LEN);
        eprint!("decoding \"{}\" ({} KB): ", name, bytes.len() / 1024);
        use_stream(&bytes);
    }
}
