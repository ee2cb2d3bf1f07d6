use crate::types::TrackRecord;

/// Fills `%name%` tokens in `template` from the record. Tokens without a
/// matching field are left as they are.
pub fn build_file_name(template: &str, record: &TrackRecord) -> String {
    let mut name = template.to_string();
    for (key, value) in record.fields() {
        let token = format!("%{}%", key);
        if name.contains(&token) {
            name = name.replace(&token, &sanitize_filename(value));
        }
    }
    name
}

pub(crate) fn sanitize_filename(value: &str) -> String {
    let mut out = String::new();
    for ch in value.chars() {
        if ch == '/' || ch == '\\' || ch == '\0' {
            out.push('_');
            continue;
        }
        if ch.is_control() {
            continue;
        }
        out.push(ch);
    }
    out.trim().to_string()
}
