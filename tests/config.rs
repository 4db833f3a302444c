mod common;

use petition_pdf::petition::SAMPLE_FONT_NAME;
use petition_pdf::{Alignment, BlockConfig, DocumentConfig, Error, PageSize};

#[test]
fn parses_full_config() {
    let json = r#"{
        "output": "out/peticao.pdf",
        "page_size": "letter",
        "margins": {"top": 50, "bottom": 60},
        "spacer": 8,
        "title": "Ação de obrigação de fazer",
        "fonts": [{"name": "Arial", "path": "/fonts/arial.ttf"}],
        "style": {"base": "BodyText", "font": "Arial", "font_size": 12, "leading": 16},
        "blocks": [
            "DOS FATOS",
            {"text": "EXCELENTÍSSIMO SENHOR", "style": {"alignment": "center"}}
        ]
    }"#;
    let config = DocumentConfig::from_json(json).unwrap();

    assert_eq!(config.page_size, PageSize::Letter);
    assert_eq!(config.margins.top, 50.0);
    assert_eq!(config.margins.bottom, 60.0);
    assert_eq!(config.margins.left, 72.0);
    assert_eq!(config.spacer, 8.0);
    assert_eq!(config.title.as_deref(), Some("Ação de obrigação de fazer"));
    assert_eq!(config.author, None);
    assert_eq!(config.fonts[0].name, "Arial");
    assert_eq!(config.style.base, "BodyText");
    assert_eq!(config.style.overrides.font.as_deref(), Some("Arial"));
    assert_eq!(config.style.overrides.font_size, Some(12.0));

    let blocks = config.blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].text, "DOS FATOS");
    assert!(blocks[0].overrides.is_none());
    assert!(matches!(config.blocks[1], BlockConfig::Styled(_)));
    assert_eq!(
        blocks[1].overrides.as_ref().and_then(|o| o.alignment),
        Some(Alignment::Center)
    );
}

#[test]
fn defaults_fill_optional_fields() {
    let json = r#"{
        "output": "a.pdf",
        "fonts": [],
        "style": {},
        "blocks": ["x"]
    }"#;
    let config = DocumentConfig::from_json(json).unwrap();
    assert_eq!(config.page_size, PageSize::A4);
    assert_eq!(config.spacer, petition_pdf::DEFAULT_SPACER_HEIGHT);
    assert_eq!(config.style.base, "Normal");
    assert!(config.style.overrides.is_empty());
}

#[test]
fn rejects_malformed_config() {
    for json in [
        r#"{"output": "a.pdf", "fonts": [], "style": {}, "blocks": [], "colour": "red"}"#,
        r#"{"output": "a.pdf", "fonts": [], "style": {}, "blocks": [], "page_size": "B5"}"#,
        r#"{"fonts": [], "style": {}, "blocks": []}"#,
        r#"{"output": "a.pdf", "fonts": [{"name": "A"}], "style": {}, "blocks": []}"#,
        r#"{"output": "a.pdf", "fonts": [], "style": {"font": "A", "fontSize": 30, "leadng": 40}, "blocks": []}"#,
        r#"{"output": "a.pdf", "fonts": [], "style": {}, "blocks": [{"text": "x", "styel": {"alignment": "center"}}]}"#,
        r#"{"output": "a.pdf", "fonts": [], "style": {}, "blocks": [{"text": "x", "style": {"align": "center"}}]}"#,
        r#"{"output": "a.pdf", "fonts": [], "style": {}, "margins": {"gutter": 10}, "blocks": []}"#,
        "not json",
    ] {
        let err = DocumentConfig::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{json}: got {err:?}");
    }
}

#[test]
fn page_size_strings() {
    assert_eq!("A4".parse::<PageSize>(), Ok(PageSize::A4));
    assert_eq!("legal".parse::<PageSize>(), Ok(PageSize::Legal));
    assert_eq!(
        "400x500".parse::<PageSize>(),
        Ok(PageSize::Custom {
            width: 400.0,
            height: 500.0
        })
    );
    assert!("0x500".parse::<PageSize>().is_err());
    assert!("tabloid".parse::<PageSize>().is_err());
    assert_eq!(PageSize::Letter.dimensions(), (612.0, 792.0));
}

#[test]
fn missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = DocumentConfig::from_path(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {err:?}");
}

#[test]
fn sample_config_with_missing_font_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("documento.pdf");
    let config = DocumentConfig::sample(SAMPLE_FONT_NAME, dir.path().join("arial.ttf"), &out);

    assert_eq!(config.blocks.len(), 6);
    let err = config.compose().unwrap_err();
    assert!(matches!(err, Error::ResourceNotFound(_)), "got {err:?}");
    assert!(!out.exists());
}

#[test]
fn sample_binds_the_font_under_the_given_name() {
    let config = DocumentConfig::sample("Corpo", "/fonts/corpo.ttf", "out.pdf");
    assert_eq!(config.fonts.len(), 1);
    assert_eq!(config.fonts[0].name, "Corpo");
    assert_eq!(config.style.overrides.font.as_deref(), Some("Corpo"));
    assert_eq!(config.style.overrides.name.as_deref(), Some("JuridicoArial"));
    assert_eq!(config.style.overrides.font_size, Some(12.0));

    let Some(font) = common::test_font() else {
        println!("SKIP: no test font found");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("corpo.pdf");
    let composition = DocumentConfig::sample("Corpo", &font, &out).compose().unwrap();
    assert_eq!(composition.paragraphs.len(), 6);
    assert!(out.is_file());
}

#[test]
fn compose_from_config_file() {
    let Some(font) = common::test_font() else {
        println!("SKIP: no test font found");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("from_config.pdf");
    let config_path = dir.path().join("peticao.json");
    let json = serde_json_config(&font, &out);
    std::fs::write(&config_path, json).unwrap();

    let config = DocumentConfig::from_path(&config_path).unwrap();
    let composition = config.compose().unwrap();

    assert!(out.is_file());
    assert_eq!(composition.paragraphs, vec!["DOS PEDIDOS", "Nestes termos, pede deferimento."]);
    assert_eq!(common::pdf_page_count(&out), composition.page_count());
    assert_eq!(common::pdf_mediabox(&out), (612.0, 1008.0));
}

fn serde_json_config(font: &std::path::Path, out: &std::path::Path) -> String {
    format!(
        r#"{{
            "output": {out:?},
            "page_size": "legal",
            "fonts": [{{"name": "Corpo", "path": {font:?}}}],
            "style": {{"font": "Corpo", "font_size": 12, "leading": 16, "space_after": 12}},
            "blocks": [
                {{"text": "DOS PEDIDOS", "style": {{"alignment": "justify"}}}},
                "Nestes termos, pede deferimento."
            ]
        }}"#,
        out = out.to_string_lossy(),
        font = font.to_string_lossy(),
    )
}
