/// Decode text bytes as UTF-8, dropping any invalid sequences.
pub fn extract_txt(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(bytes)
            .chars()
            .filter(|&c| c != char::REPLACEMENT_CHARACTER)
            .collect(),
    }
}
