use crate::record::NormalizedRecord;
use anyhow::{Result, anyhow};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub enum Writer {
    Json(Box<dyn Write + Send>, bool), // bool tracks if a record has been written yet
    Jsonl(Box<dyn Write + Send>),
}

impl Writer {
    pub fn write_batch(&mut self, records: &[NormalizedRecord]) -> Result<()> {
        match self {
            Writer::Json(writer, wrote_any) => {
                for record in records {
                    if *wrote_any {
                        write!(writer, ",")?;
                    } else {
                        write!(writer, "[")?;
                        *wrote_any = true;
                    }
                    let serialized = serde_json::to_string_pretty(record)?;
                    write!(writer, "\n{}", serialized)?;
                }
            }
            Writer::Jsonl(writer) => {
                for record in records {
                    let serialized = serde_json::to_string(record)?;
                    writeln!(writer, "{}", serialized)?;
                }
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        match self {
            Writer::Json(ref mut writer, wrote_any) => {
                if wrote_any {
                    writeln!(writer, "\n]")?;
                } else {
                    writeln!(writer, "[]")?;
                }
                writer.flush()?;
            }
            Writer::Jsonl(ref mut writer) => {
                writer.flush()?;
            }
        }
        Ok(())
    }
}

pub fn create_writer(output_arg: &str) -> Result<Writer> {
    match output_arg {
        "stdout" => Ok(Writer::Jsonl(Box::new(io::stdout()))),
        "json" => Ok(Writer::Json(Box::new(io::stdout()), false)),
        path if path.ends_with(".jsonl") || path.ends_with(".ndjson") => {
            Ok(Writer::Jsonl(Box::new(open_file(path)?)))
        }
        path if path.ends_with(".json") => Ok(Writer::Json(Box::new(open_file(path)?), false)),
        path => {
            // Default to JSON file if it looks like a path
            if path.contains('/') || path.contains('\\') || path.contains('.') {
                Ok(Writer::Json(Box::new(open_file(path)?), false))
            } else {
                Err(anyhow!(
                    "Unknown output format: {}. Use 'stdout', 'json', or a file path",
                    output_arg
                ))
            }
        }
    }
}

fn open_file(path: &str) -> Result<BufWriter<File>> {
    create_parent_dirs(path)?;
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

fn create_parent_dirs(file_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DescriptiveField;

    fn record(name: &str) -> NormalizedRecord {
        let mut record = NormalizedRecord {
            name: name.to_string(),
            emails: vec!["abuse@godaddy.com".to_string()],
            ..Default::default()
        };
        record.details.insert(DescriptiveField::Country, Some("CA".into()));
        record
    }

    #[test]
    fn json_file_is_a_valid_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        let mut writer = create_writer(path.to_str().unwrap()).unwrap();
        writer.write_batch(&[record("a.com")]).unwrap();
        writer.write_batch(&[]).unwrap();
        writer.write_batch(&[record("b.com"), record("c.com")]).unwrap();
        writer.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[1]["name"], "b.com");
        assert_eq!(parsed[2]["country"], "CA");
    }

    #[test]
    fn empty_json_file_is_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let writer = create_writer(path.to_str().unwrap()).unwrap();
        writer.finish().unwrap();
        let parsed: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn jsonl_file_has_one_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ndjson");
        let mut writer = create_writer(path.to_str().unwrap()).unwrap();
        writer.write_batch(&[record("a.com"), record("b.com")]).unwrap();
        writer.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "a.com");
        assert!(first.get("contact_names").is_none());
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert!(create_writer("kafka").is_err());
    }
}
