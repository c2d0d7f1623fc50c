/// Plain-text export: the text as UTF-8 bytes, no added structure.
pub fn export_txt(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}
