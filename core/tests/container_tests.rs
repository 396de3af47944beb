use std::io::Cursor;

use vozgen_core::{
    decode, encode, synthesize_to_container, AudioDescriptor, ContainerHeader, DecodeError,
    HEADER_LEN,
};

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn single_sample_round_trip(f: f32) -> f32 {
    let blob = encode(&[f], &AudioDescriptor::mono16(24000)).unwrap();
    let d = blob.data();
    i16::from_le_bytes([d[0], d[1]]) as f32 / 32768.0
}

#[test]
fn test_round_trip_amplitude_law() {
    let bound = 1.0 / 32768.0;
    let probes = [
        -1.0f32, -0.999_99, -0.75, -0.5, -0.123_456, -1e-6, 0.0, 1e-6, 0.1, 0.333_333, 0.5, 0.9,
        0.99, 0.999_99, 1.0,
    ];
    for f in probes {
        let back = single_sample_round_trip(f);
        assert!(
            (f64::from(back) - f64::from(f)).abs() <= bound,
            "f={f} back={back}"
        );
    }
}

#[test]
fn test_header_fields_track_sample_count() {
    for n in [0usize, 1, 2, 3, 255, 1000, 24000] {
        let blob = encode(&vec![0.1; n], &AudioDescriptor::mono16(24000)).unwrap();
        let b = blob.as_bytes();
        assert_eq!(b.len(), HEADER_LEN + 2 * n);
        assert_eq!(u32_at(b, 4) as usize, 36 + 2 * n);
        assert_eq!(u32_at(b, 40) as usize, 2 * n);
    }
}

#[test]
fn test_decode_never_drops_trailing_byte() {
    // Five bytes: 00 00 00 00 00
    assert_eq!(
        decode("AAAAAAA="),
        Err(DecodeError::OddByteCount { len: 5 })
    );
}

#[test]
fn test_end_to_end_scenario() {
    let samples = decode("AAD/fwCA").unwrap();
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0], 0.0);
    assert!((samples[1] - 0.999_969).abs() < 1e-6);
    assert_eq!(samples[2], -1.0);

    let blob = encode(&samples, &AudioDescriptor::mono16(24000)).unwrap();
    assert_eq!(blob.len(), 50);
    assert_eq!(&blob.as_bytes()[44..], &[0x00, 0x00, 0xFF, 0x7F, 0x00, 0x80]);
}

#[test]
fn test_standard_reader_accepts_container() {
    let blob = encode(&[0.0, 0.5, -0.5, 1.0, -1.0], &AudioDescriptor::mono16(24000)).unwrap();
    let mut reader = hound::WavReader::new(Cursor::new(blob.as_bytes())).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 24000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, vec![0, 16384, -16384, 32767, -32768]);
}

#[test]
fn test_written_file_reads_back() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("clip.wav");
    let blob = synthesize_to_container("AAD/fwCA", 24000)?;
    std::fs::write(&path, blob.as_bytes())?;

    let reader = hound::WavReader::open(&path)?;
    assert_eq!(reader.len(), 3);
    assert!((reader.duration() as f64 / 24000.0 - blob.duration_secs()).abs() < 1e-9);

    let on_disk = std::fs::read(&path)?;
    let header = ContainerHeader::parse(&on_disk)?;
    assert_eq!(header.data_len, 6);
    Ok(())
}
