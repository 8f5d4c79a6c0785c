use super::*;

fn local(id: &str, arch: &str, zone: &str) -> LocalImage {
    LocalImage {
        id: id.to_string(),
        arch: arch.to_string(),
        zone: zone.to_string(),
    }
}

#[test]
fn test_arch_from_str_accepts_known_values() {
    assert_eq!("x86_64".parse::<Arch>().unwrap(), Arch::X86_64);
    assert_eq!("arm64".parse::<Arch>().unwrap(), Arch::Arm64);
    assert_eq!("arm".parse::<Arch>().unwrap(), Arch::Arm);
}

#[test]
fn test_arch_from_str_rejects_unknown_value() {
    let err = "mips".parse::<Arch>().unwrap_err();
    assert!(matches!(err, MarketError::InvalidArgument { .. }));
    assert!(err.to_string().contains("mips"));
    assert!(err.to_string().contains("x86_64"));
}

#[test]
fn test_arch_from_str_is_case_sensitive() {
    assert!("ARM64".parse::<Arch>().is_err());
    assert!("X86_64".parse::<Arch>().is_err());
    assert!(" arm".parse::<Arch>().is_err());
    assert!("".parse::<Arch>().is_err());
}

#[test]
fn test_arch_default_is_x86_64() {
    assert_eq!(Arch::default(), Arch::X86_64);
}

#[test]
fn test_arch_display_matches_wire_name() {
    for arch in Arch::ALL {
        assert_eq!(arch.to_string(), arch.as_str());
        assert_eq!(arch.as_str().parse::<Arch>().unwrap(), arch);
    }
}

#[test]
fn test_arch_serde_uses_wire_name() {
    assert_eq!(serde_json::to_string(&Arch::Arm64).unwrap(), "\"arm64\"");
    let arch: Arch = serde_json::from_str("\"x86_64\"").unwrap();
    assert_eq!(arch, Arch::X86_64);
}

#[test]
fn test_local_image_matches_exactly() {
    let arm = local("li1", "arm", "fr-par-1");
    assert!(arm.matches(Arch::Arm));
    assert!(!arm.matches(Arch::Arm64));
    assert!(!arm.matches(Arch::X86_64));

    let arm64 = local("li2", "arm64", "fr-par-1");
    assert!(arm64.matches(Arch::Arm64));
    assert!(!arm64.matches(Arch::Arm));
}

#[test]
fn test_local_image_unknown_arch_never_matches() {
    let riscv = local("li3", "riscv64", "nl-ams-1");
    assert!(Arch::ALL.iter().all(|arch| !riscv.matches(*arch)));
}

#[test]
fn test_images_response_deserialization() {
    let json = r#"{
        "images": [{
            "id": "im1",
            "name": "Ubuntu Bionic",
            "versions": [{
                "id": "v1",
                "local_images": [
                    {"id": "li1", "arch": "x86_64", "zone": "fr-par-1"},
                    {"id": "li2", "arch": "arm64", "zone": "nl-ams-1"}
                ]
            }]
        }]
    }"#;
    let response: ImagesResponse = serde_json::from_str(json).unwrap();

    assert_eq!(response.images.len(), 1);
    let image = &response.images[0];
    assert_eq!(image.id, "im1");
    assert_eq!(image.name, "Ubuntu Bionic");
    assert_eq!(image.versions[0].id, "v1");
    assert_eq!(image.versions[0].local_images[1], local("li2", "arm64", "nl-ams-1"));
}

#[test]
fn test_images_response_ignores_unknown_fields() {
    let json = r#"{
        "images": [{
            "id": "im1",
            "name": "Debian",
            "label": "debian_buster",
            "categories": ["distribution"],
            "versions": []
        }],
        "total_count": 1
    }"#;
    let response: ImagesResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.images[0].name, "Debian");
}

#[test]
fn test_missing_versions_and_local_images_default_to_empty() {
    let json = r#"{"images": [
        {"id": "im1", "name": "A"},
        {"id": "im2", "name": "B", "versions": [{"id": "v1"}]}
    ]}"#;
    let response: ImagesResponse = serde_json::from_str(json).unwrap();

    assert!(response.images[0].versions.is_empty());
    assert!(response.images[1].versions[0].local_images.is_empty());
}

#[test]
fn test_missing_images_field_fails() {
    let result = serde_json::from_str::<ImagesResponse>(r#"{"servers": []}"#);
    assert!(result.is_err());
}

#[test]
fn test_local_images_for_flattens_versions() {
    let image = Image {
        id: "im1".to_string(),
        name: "Ubuntu".to_string(),
        versions: vec![
            ImageVersion {
                id: "v1".to_string(),
                local_images: vec![
                    local("a", "x86_64", "fr-par-1"),
                    local("b", "arm", "fr-par-1"),
                ],
            },
            ImageVersion {
                id: "v2".to_string(),
                local_images: vec![local("c", "x86_64", "nl-ams-1")],
            },
        ],
    };

    let ids: Vec<&str> = image
        .local_images_for(Arch::X86_64)
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(image.local_images_for(Arch::Arm64).count(), 0);
}

#[test]
fn test_validate_rejects_empty_ids() {
    let mut image = Image {
        id: "im1".to_string(),
        name: "Ubuntu".to_string(),
        versions: vec![ImageVersion {
            id: "v1".to_string(),
            local_images: vec![local("li1", "x86_64", "fr-par-1")],
        }],
    };
    assert!(image.validate().is_ok());

    image.versions[0].local_images[0].id.clear();
    assert!(matches!(
        image.validate().unwrap_err(),
        MarketError::Decode { .. }
    ));

    image.versions[0].local_images[0].id = "li1".to_string();
    image.versions[0].id.clear();
    assert!(image.validate().is_err());

    image.versions[0].id = "v1".to_string();
    image.id.clear();
    assert!(image.validate().is_err());
}

#[test]
fn test_page_is_last() {
    let last = Page {
        images: vec![],
        next_url: None,
    };
    let middle = Page {
        images: vec![],
        next_url: Some("https://api.example.com/images?page=2".to_string()),
    };
    assert!(last.is_last());
    assert!(!middle.is_last());
}
