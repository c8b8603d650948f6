//! Load and save client records as JSON

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Deserialize;

use super::ClientRecord;
use crate::error::Result;

/// A file holds either the saved client list or a single client
#[derive(Deserialize)]
#[serde(untagged)]
enum ClientFile {
    Many(Vec<ClientRecord>),
    One(Box<ClientRecord>),
}

/// Load client records from any reader
pub fn load_clients_from_reader<R: Read>(reader: R) -> Result<Vec<ClientRecord>> {
    let clients = match serde_json::from_reader(reader)? {
        ClientFile::Many(clients) => clients,
        ClientFile::One(client) => vec![*client],
    };
    Ok(clients)
}

/// Load client records from a JSON file
pub fn load_clients<P: AsRef<Path>>(path: P) -> Result<Vec<ClientRecord>> {
    let path = path.as_ref();
    let clients = load_clients_from_reader(BufReader::new(File::open(path)?))?;
    log::debug!("loaded {} client record(s) from {}", clients.len(), path.display());
    Ok(clients)
}

/// Write client records as a pretty-printed JSON array
pub fn save_clients<W: Write>(writer: W, clients: &[ClientRecord]) -> Result<()> {
    serde_json::to_writer_pretty(writer, clients)?;
    Ok(())
}

/// Write client records to a JSON file, replacing it
pub fn save_clients_to_path<P: AsRef<Path>>(path: P, clients: &[ClientRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    save_clients(&mut writer, clients)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_list_or_single() {
        let list = r#"[{"profile": {"name": "A"}}, {"profile": {"name": "B"}}]"#;
        let clients = load_clients_from_reader(list.as_bytes()).unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[1].profile.name, "B");

        let single = r#"{"profile": {"name": "Solo", "dob": "1985-01-20"}}"#;
        let clients = load_clients_from_reader(single.as_bytes()).unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].profile.name, "Solo");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(load_clients_from_reader("{not json".as_bytes()).is_err());
        assert!(load_clients("/nonexistent/clients.json").is_err());
    }

    #[test]
    fn test_save_then_load() {
        let mut client = ClientRecord::default();
        client.profile.name = "Lim".to_string();

        let mut buffer = Vec::new();
        save_clients(&mut buffer, &[client.clone()]).unwrap();

        let loaded = load_clients_from_reader(buffer.as_slice()).unwrap();
        assert_eq!(loaded, vec![client]);
    }
}
