// WHY: Output formats shared by the CLI and embedding services

use crate::sentence::Sentence;

/// JSON array of sentence strings
pub fn to_json(sentences: &[Sentence]) -> serde_json::Result<String> {
    let texts: Vec<&str> = sentences.iter().map(Sentence::text).collect();
    serde_json::to_string(&texts)
}

/// One `<s>` element per sentence, carrying `n="ID"` when indexed.
/// Sentence text is emitted as-is since it may already contain markup.
pub fn to_xml(sentences: &[Sentence]) -> String {
    let mut xml = String::new();
    for sentence in sentences {
        match sentence.id() {
            Some(id) => xml.push_str(&format!("<s n=\"{id}\">")),
            None => xml.push_str("<s>"),
        }
        xml.push_str(sentence.text());
        xml.push_str("</s>");
    }
    xml
}

/// One `id\ttext` line per sentence, id column empty when unindexed
pub fn to_tsv(sentences: &[Sentence]) -> String {
    let mut out = String::new();
    for sentence in sentences {
        if let Some(id) = sentence.id() {
            out.push_str(&id.to_string());
        }
        out.push('\t');
        out.push_str(sentence.text());
        out.push('\n');
    }
    out
}
