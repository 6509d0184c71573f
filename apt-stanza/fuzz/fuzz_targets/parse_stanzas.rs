#![no_main]

use apt_stanza::{parse_field_map, split_stanzas, Document};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let fields = parse_field_map(s);
        for (name, value) in fields.entries() {
            assert_eq!(fields.get(name), Some(value));
        }

        let stanzas = split_stanzas(s);
        for stanza in &stanzas {
            assert_eq!(split_stanzas(stanza), vec![stanza.clone()]);
        }

        let doc: Document = s.parse().unwrap();
        assert_eq!(doc.len(), stanzas.len());
    }
});
