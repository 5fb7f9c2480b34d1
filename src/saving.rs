use bincode::{deserialize_from, serialize_into};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::fs::File;

use crate::proposal::Proposal;

pub fn save_snapshot(proposals: &[Proposal], filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut writer = std::io::BufWriter::new(encoder);

    serialize_into(&mut writer, proposals)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(())
}

pub fn load_snapshot(filename: &str) -> std::io::Result<Vec<Proposal>> {
    let file = File::open(filename)?;
    let decoder = GzDecoder::new(file);
    let mut reader = std::io::BufReader::new(decoder);

    let proposals: Vec<Proposal> = deserialize_from(&mut reader)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    Ok(proposals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::Person;

    #[test]
    fn snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.bin.gz");
        let path = path.to_str().unwrap();

        let mut p = Proposal::new("ABM-404");
        p.titulares = Some(vec![Person {
            nome_completo: Some("Jane Doe".to_string()),
            ..Default::default()
        }]);
        let batch = vec![p, Proposal::new("ABM-405")];

        save_snapshot(&batch, path).unwrap();
        let loaded = load_snapshot(path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].abm_code, "ABM-404");
        assert_eq!(loaded[0].titulares().len(), 1);
        assert_eq!(loaded[1].abm_code, "ABM-405");
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(load_snapshot("/nonexistent/store.bin.gz").is_err());
    }
}
