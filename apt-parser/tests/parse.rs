use apt_parser::{
    parse_control, parse_package_list, parse_package_list_with, parse_release, ErrorPolicy,
    Fields, HashField, MultiArch, Options, Priority, Record, Validation,
};
use chrono::{TimeZone, Utc};

const CLANG: &str = include_str!("data/clang.control");
const SIGNALREBORN: &str = include_str!("data/signalreborn.control");
const CHARIZ_RELEASE: &str = include_str!("data/chariz.release");
const JAMMY_RELEASE: &str = include_str!("data/jammy.release");
const CHARIZ_PACKAGES: &str = include_str!("data/chariz.packages");
const JAMMY_PACKAGES: &str = include_str!("data/jammy.packages");

#[test]
fn test_control_clang() {
    let control = parse_control(CLANG).unwrap();

    assert_eq!(control.package, "clang");
    assert_eq!(control.source.as_deref(), Some("llvm-defaults (0.54)"));
    assert_eq!(control.version, "1:13.0-54");
    assert_eq!(control.architecture, "amd64");
    assert_eq!(control.installed_size, Some(24));
    assert_eq!(control.section.as_deref(), Some("devel"));
    assert_eq!(control.priority, Some(Priority::Optional));
    assert_eq!(control.multi_arch, Some(MultiArch::Allowed));
    assert_eq!(
        control.maintainer,
        "Ubuntu Developers <ubuntu-devel-discuss@lists.ubuntu.com>"
    );
    assert_eq!(
        control.get("Original-Maintainer"),
        Some("LLVM Packaging Team <pkg-llvm-team@lists.alioth.debian.org>")
    );

    assert_eq!(control.depends, Some(vec!["clang-13 (>= 13~)".to_string()]));
    assert_eq!(
        control.breaks,
        Some(vec![
            "clang-3.2".to_string(),
            "clang-3.3".to_string(),
            "clang-3.4 (<< 1:3.4.2-7~exp1)".to_string(),
            "clang-3.5 (<< 1:3.5~+rc1-3~exp1)".to_string(),
        ])
    );
    assert_eq!(control.replaces.as_ref().map(Vec::len), Some(5));
    assert_eq!(
        control.replaces.as_ref().map(|r| r[0].as_str()),
        Some("clang (<< 3.2-1~exp2)")
    );

    assert_eq!(
        control.description,
        "C, C++ and Objective-C compiler (LLVM based), clang binary Clang project is a C, C++, \
         Objective C and Objective C++ front-end for the LLVM compiler. Its goal is to offer a \
         replacement to the GNU Compiler Collection (GCC). Clang implements all of the ISO C++ \
         1998, 11 and 14 standards and also provides most of the support of C++17. This is a \
         dependency package providing the default clang compiler."
    );
}

#[test]
fn test_control_signalreborn() {
    let control = parse_control(SIGNALREBORN).unwrap();

    assert_eq!(control.package, "com.amywhile.signalreborn");
    assert_eq!(control.architecture, "iphoneos-arm");
    assert_eq!(control.description, "Visualise your nearby cell towers");
    assert_eq!(
        control.depends,
        Some(vec!["firmware (>= 12.2) | org.swift.libswift".to_string()])
    );
    for relation in [&control.conflicts, &control.replaces, &control.breaks] {
        assert_eq!(
            relation.as_deref(),
            Some(&["com.charliewhile.signalreborn".to_string()][..])
        );
    }
    assert_eq!(control.maintainer, "Amy While <support@anamy.gay>");
    assert_eq!(control.section.as_deref(), Some("Applications"));
    assert_eq!(control.version, "2.2.1-2");
    assert_eq!(control.installed_size, Some(1536));
    assert_eq!(control.priority, None);

    assert_eq!(control.get("Name"), Some("SignalReborn"));
    assert_eq!(control.get("Author"), Some("Amy While <support@anamy.gay>"));
    assert_eq!(control.get("Tag"), Some("compatible_min::ios11.0"));
    assert_eq!(
        control.get("Icon"),
        Some("https://img.chariz.cloud/icon/signal/icon@3x.png")
    );
    assert_eq!(control.get("Depiction"), Some("https://chariz.com/get/signal"));
}

#[test]
fn test_release_chariz() {
    let release = parse_release(CHARIZ_RELEASE).unwrap();

    assert_eq!(release.field_count(), 11);
    assert_eq!(
        release.architectures,
        Some(vec!["iphoneos-arm".to_string(), "iphoneos-arm64".to_string()])
    );
    assert_eq!(release.no_support_for_architecture_all, None);
    assert_eq!(
        release.description.as_deref(),
        Some("Check out what’s new and download purchases from the Chariz marketplace!")
    );
    assert_eq!(release.origin.as_deref(), Some("Chariz"));
    assert_eq!(release.label.as_deref(), Some("Chariz"));
    assert_eq!(release.suite.as_deref(), Some("stable"));
    assert_eq!(release.codename.as_deref(), Some("hbang"));
    assert_eq!(release.version.as_deref(), Some("0.9"));
    assert_eq!(
        release.date,
        Some(Utc.with_ymd_and_hms(2022, 1, 13, 7, 15, 42).unwrap().fixed_offset())
    );
    assert_eq!(release.valid_until, None);
    assert_eq!(release.components, Some(vec!["main".to_string()]));

    assert_eq!(release.md5.as_ref().map(Vec::len), Some(5));
    assert_eq!(release.sha1, None);
    assert_eq!(release.sha256, None);
    assert_eq!(release.sha512.as_ref().map(Vec::len), Some(5));

    let md5 = release.hashes(HashField::Md5Sum).unwrap();
    assert_eq!(md5[0].filename, "Packages");
    assert_eq!(md5[0].size, 512230);
    assert_eq!(md5[4].filename, "Packages.zst");

    assert_eq!(release.not_automatic, None);
    assert_eq!(release.but_automatic_upgrades, None);
    assert_eq!(release.acquire_by_hash, None);
    assert_eq!(release.signed_by, None);
    assert_eq!(release.packages_require_authorization, None);
}

#[test]
fn test_release_jammy() {
    let release = parse_release(JAMMY_RELEASE).unwrap();

    assert_eq!(release.field_count(), 13);
    assert_eq!(
        release.architectures,
        Some(
            ["amd64", "arm64", "armhf", "i386", "ppc64el", "riscv64", "s390x"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        )
    );
    assert_eq!(release.description.as_deref(), Some("Ubuntu Jammy 22.04"));
    assert_eq!(release.codename.as_deref(), Some("jammy"));
    assert_eq!(
        release.date,
        Some(Utc.with_ymd_and_hms(2022, 1, 15, 22, 1, 6).unwrap().fixed_offset())
    );
    assert_eq!(release.components.as_ref().map(Vec::len), Some(4));

    for field in [HashField::Md5Sum, HashField::Sha1, HashField::Sha256] {
        let records = release.hashes(field).unwrap();
        assert_eq!(records.len(), 4, "{}", field);
        assert_eq!(records[2].filename, "main/binary-amd64/Release");
        assert_eq!(records[2].size, 112);
    }
    assert_eq!(release.hashes(HashField::Sha512), None);

    assert_eq!(release.acquire_by_hash, Some(true));
    assert_eq!(release.not_automatic, None);
}

#[test]
fn test_packages_chariz() {
    let packages = parse_package_list(CHARIZ_PACKAGES).unwrap();
    assert_eq!(packages.len(), 2);

    let package = &packages[0];
    assert_eq!(package.package, "arpoison");
    assert_eq!(package.architecture, "iphoneos-arm");
    assert_eq!(package.description, "Generates user-defined ARP packets");
    assert_eq!(package.maintainer, "MidnightChips <midnightchips@gmail.com>");
    assert_eq!(package.version, "0.7");
    assert_eq!(package.section.as_deref(), Some("System"));
    assert_eq!(package.homepage.as_deref(), Some("http://www.arpoison.net/"));
    assert_eq!(package.depends, Some(vec!["libnet9".to_string()]));
    assert_eq!(package.filename, "debs/arpoison_0.7_iphoneos-arm.deb");
    assert_eq!(package.size, 9618);
    assert_eq!(package.installed_size, Some(88));
    assert_eq!(
        package.sha256.as_deref(),
        Some("9f9f615c50e917e0ce629966899ed28ba78fa637c5de5476aac34f630ab18dd5")
    );
    assert_eq!(package.md5.as_deref(), Some("e0be09b9f6d1c17371701d0ed6f625bf"));

    assert_eq!(package.get("Author"), Some("MidnightChips <midnightchips@gmail.com>"));
    assert_eq!(package.get("Depiction"), Some("https://chariz.com/get/arpoison"));
    assert_eq!(
        package.get("SileoDepiction"),
        Some("https://repo.chariz.com/api/sileo/package/arpoison/depiction.json")
    );
    assert_eq!(package.get("Tag"), Some("role::developer, compatible_min::ios14.0"));

    assert_eq!(packages[1].package, "ws.hbang.common");
    assert_eq!(packages[1].depends.as_ref().map(Vec::len), Some(3));
}

#[test]
fn test_packages_jammy() {
    let packages = parse_package_list(JAMMY_PACKAGES).unwrap();
    assert_eq!(packages.len(), 2);

    let package = &packages[0];
    assert_eq!(package.package, "accountsservice");
    assert_eq!(package.architecture, "amd64");
    assert_eq!(package.version, "0.6.55-3ubuntu2");
    assert_eq!(package.priority, Some(Priority::Optional));
    assert_eq!(package.section.as_deref(), Some("gnome"));
    assert_eq!(package.installed_size, Some(484));
    assert_eq!(
        package.depends,
        Some(vec![
            "dbus (>= 1.9.18)".to_string(),
            "libaccountsservice0 (= 0.6.55-3ubuntu2)".to_string(),
            "libc6 (>= 2.34)".to_string(),
            "libglib2.0-0 (>= 2.44)".to_string(),
            "libpolkit-gobject-1-0 (>= 0.99)".to_string(),
        ])
    );
    assert_eq!(package.recommends, Some(vec!["default-logind | logind".to_string()]));
    assert_eq!(package.suggests, Some(vec!["gnome-control-center".to_string()]));
    assert_eq!(package.size, 66304);
    assert_eq!(package.md5.as_deref(), Some("d1dc884f3b039c09d9aaa317d6614582"));
    assert_eq!(
        package.sha1.as_deref(),
        Some("f0c2c870146d05b8d53cd805527e942ca793ce38")
    );
    assert_eq!(package.sha512.as_ref().map(String::len), Some(128));
    assert_eq!(
        package.description,
        "query and manipulate user account information"
    );
    assert_eq!(
        package.description_md5.as_deref(),
        Some("8aeed0a03c7cd494f0c4b8d977483d7e")
    );
    assert_eq!(package.get("Origin"), Some("Ubuntu"));
    assert_eq!(
        package.get("Bugs"),
        Some("https://bugs.launchpad.net/ubuntu/+filebug")
    );
    assert!(package
        .get("Task")
        .unwrap()
        .ends_with("ubuntu-budgie-desktop-raspi"));
}

fn repeat_stanzas(template: &str, count: usize) -> String {
    let template = template.split("\n\n").next().unwrap().trim();
    (0..count)
        .map(|i| {
            let mut lines = template.lines();
            let first = lines.next().unwrap();
            let rest: Vec<_> = lines.collect();
            format!("{}-{}\n{}\n\n", first, i, rest.join("\n"))
        })
        .collect()
}

#[test]
fn test_large_indices() {
    for (template, count) in [(CHARIZ_PACKAGES, 415), (JAMMY_PACKAGES, 6132)] {
        let text = repeat_stanzas(template, count);
        let packages = parse_package_list(&text).unwrap();
        assert_eq!(packages.len(), count);

        for (i, package) in packages.iter().enumerate() {
            assert!(package.package.ends_with(&format!("-{}", i)));
        }
    }
}

#[test]
fn test_crlf_index() {
    let text = JAMMY_PACKAGES.replace('\n', "\r\n");
    let packages = parse_package_list(&text).unwrap();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[1].package, "acct");
    assert_eq!(packages[1].size, 89124);
}

#[test]
fn test_skip_policy() {
    let text = format!("{}\n\nPackage: broken\nVersion: 1.0\n", CHARIZ_PACKAGES);

    let err = parse_package_list(&text).unwrap_err();
    assert_eq!(
        err,
        apt_parser::Error::MissingRequiredField("Architecture".to_string()).in_stanza(2)
    );

    let options = Options::default().with_error_policy(ErrorPolicy::Skip);
    let packages = parse_package_list_with(&text, &options).unwrap();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages.skipped().len(), 1);

    let packages = parse_package_list_with(&text, &Options::lenient()).unwrap();
    assert_eq!(packages.len(), 3);
    assert_eq!(packages[2].architecture, "");
    assert_eq!(packages[2].size, 0);
}

#[test]
fn test_records() {
    let records: Vec<Record> = vec![
        parse_control(CLANG).unwrap().into(),
        parse_release(JAMMY_RELEASE).unwrap().into(),
        parse_package_list(JAMMY_PACKAGES)
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
            .into(),
        CHARIZ_RELEASE.parse::<apt_parser::GenericRecord>().unwrap().into(),
    ];

    let controls: Vec<_> = records
        .iter()
        .filter_map(Record::as_control)
        .map(|c| c.package.as_str())
        .collect();
    assert_eq!(controls, vec!["clang", "accountsservice"]);

    assert_eq!(records.iter().filter_map(Record::as_release).count(), 1);
    assert_eq!(records[3].get("origin"), Some("Chariz"));
    assert_eq!(records[3].field_count(), 11);
}

#[test]
fn test_lenient_release() {
    let text = CHARIZ_RELEASE.replace("Thu, 13 Jan 2022 07:15:42 +0000", "13/01/2022");
    assert!(parse_release(&text).is_err());

    let options = Options::strict().with_validation(Validation::Lenient);
    let release = apt_parser::parse_release_with(&text, &options).unwrap();
    assert_eq!(release.date, None);
    assert_eq!(release.origin.as_deref(), Some("Chariz"));
}

#[cfg(feature = "serde")]
#[test]
fn test_serialize() {
    let release = parse_release("Origin: Test\nMD5Sum:\n abc 12 Packages\n").unwrap();
    let value = serde_json::to_value(&release).unwrap();

    assert_eq!(value["origin"], "Test");
    assert_eq!(value["md5"][0]["filename"], "Packages");
    assert_eq!(value["md5"][0]["size"], 12);
    assert_eq!(value["fields"]["Origin"], "Test");
}

#[test]
fn test_missing_package() {
    let text = CLANG.replace("Package: clang\n", "");
    assert_eq!(
        parse_control(&text),
        Err(apt_parser::Error::MissingRequiredField("Package".to_string()))
    );

    let control = apt_parser::parse_control_with(&text, &Options::lenient()).unwrap();
    assert_eq!(control.package, "");
    assert_eq!(control.version, "1:13.0-54");
}

#[test]
fn test_field_map_properties() {
    let fields = apt_parser::parse_field_map(
        "Maintainer: Jane Doe <jane@example.com>\nMaintainer: John Doe <john@example.com>\n\
         MD5Sum: aaa111 100 pool/a.deb bbb222 200 pool/b.deb\n",
    );
    assert_eq!(fields.get("Maintainer"), fields.get("MAINTAINER"));
    assert_eq!(fields.get("maintainer"), Some("Jane Doe <jane@example.com>"));

    let records = apt_parser::decode_hash_list(&fields, HashField::Md5Sum).unwrap();
    assert_eq!(
        records,
        vec![
            apt_parser::HashRecord {
                filename: "pool/a.deb".to_string(),
                hash: "aaa111".to_string(),
                size: 100,
            },
            apt_parser::HashRecord {
                filename: "pool/b.deb".to_string(),
                hash: "bbb222".to_string(),
                size: 200,
            },
        ]
    );
}
