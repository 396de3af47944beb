use session_history::{export_item, export_latest, HistoryError, HistoryItem, SessionHistory};
use speech_service::GenerationSettings;
use vozgen_core::{synthesize_to_container, ContainerHeader};

fn boundary_item(text: &str) -> HistoryItem {
    let clip = synthesize_to_container("AAD/fwCA", 24000).unwrap();
    HistoryItem::new(&GenerationSettings::new(text), clip)
}

#[test]
fn test_export_latest_writes_playable_wav() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut history = SessionHistory::new();
    history.push(boundary_item("primero"));
    let latest = boundary_item("segundo");
    let latest_id = latest.id.clone();
    history.push(latest);

    let path = export_latest(&history, dir.path())?;
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some(format!("voice-gen-{latest_id}.wav").as_str())
    );

    let bytes = std::fs::read(&path)?;
    let header = ContainerHeader::parse(&bytes)?;
    assert_eq!(header.sample_rate, 24000);
    assert_eq!(header.sample_count(), 3);

    let mut reader = hound::WavReader::open(&path)?;
    let samples: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>()?;
    assert_eq!(samples, vec![0, 32767, -32768]);
    Ok(())
}

#[test]
fn test_export_latest_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let err = export_latest(&SessionHistory::new(), dir.path()).unwrap_err();
    assert!(matches!(err, HistoryError::Empty));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_export_creates_directory() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let nested = dir.path().join("clips").join("today");
    let item = boundary_item("hola");

    let path = export_item(&item, &nested)?;
    assert!(path.starts_with(&nested));
    assert_eq!(std::fs::read(&path)?, item.clip.as_bytes());
    Ok(())
}

#[test]
fn test_export_into_file_path_fails() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x")?;

    let err = export_item(&boundary_item("hola"), &blocker).unwrap_err();
    assert!(matches!(err, HistoryError::Write { .. }));
    Ok(())
}

#[test]
fn test_summaries_serialize() -> anyhow::Result<()> {
    let mut history = SessionHistory::new();
    history.push(boundary_item("hola"));
    let summaries: Vec<_> = history.iter().map(HistoryItem::summary).collect();

    let json = serde_json::to_value(&summaries)?;
    assert_eq!(json[0]["text_snippet"], "hola");
    assert_eq!(json[0]["settings"]["accent"], "peru");
    assert_eq!(json[0]["settings"]["voice_id"], "f1");
    assert_eq!(json[0]["size_bytes"], 50);
    Ok(())
}
