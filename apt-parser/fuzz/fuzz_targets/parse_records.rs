#![no_main]

use apt_parser::{
    ControlRecord, ErrorPolicy, FromStanza, Options, Packages, ReleaseRecord, Validation,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = s.parse::<ControlRecord>();
        let _ = s.parse::<ReleaseRecord>();

        // Lenient projections never fail.
        assert!(ControlRecord::from_text(s, Validation::Lenient).is_ok());
        assert!(ReleaseRecord::from_text(s, Validation::Lenient).is_ok());

        let strict = Packages::parse(s, &Options::strict().with_error_policy(ErrorPolicy::Skip));
        let lenient = Packages::parse(s, &Options::lenient());
        if let (Ok(strict), Ok(lenient)) = (strict, lenient) {
            assert!(strict.len() <= lenient.len());
            assert!(lenient.skipped().is_empty());
        }
    }
});
