use cv_gen::layout::{layout_resume, DrawOp};
use cv_gen::{
    export, export_filename, DirectorySink, FontBook, ResumeDocument, ResumeStore,
    SectionVisibility, StandardMetrics, TemplateConfig, TextMeasurer,
};

const ANA: &str = r#"{
    "personalInfo": {
        "name": "Ana Souza",
        "email": "ana@example.com",
        "linkedin": "linkedin.com/in/ana"
    },
    "experiences": [
        {
            "company": "Acme",
            "position": "Backend Engineer",
            "startDate": "2020-01",
            "endDate": "",
            "current": true,
            "description": "Payments platform.",
            "achievements": ["Cut p99 latency in half"]
        }
    ],
    "skills": ["Go", "Rust"]
}"#;

fn ana() -> ResumeDocument {
    serde_json::from_str(ANA).expect("valid document")
}

#[test]
fn ana_fits_on_one_page() {
    let config = TemplateConfig::default();
    let geometry = config.geometry().expect("valid page");
    let layout = layout_resume(
        &ana(),
        &SectionVisibility::all(),
        geometry,
        &StandardMetrics,
        &config,
    )
    .expect("lays out");

    assert_eq!(layout.page_count(), 1);
    let texts: Vec<&str> = layout.texts().collect();
    assert!(texts.contains(&"01/2020 - Presente"));
    assert!(texts.contains(&"Go  •  Rust"));
    assert!(texts.contains(&"LinkedIn: linkedin.com/in/ana"));

    let name = layout
        .ops
        .iter()
        .find(|op| op.text() == Some("Ana Souza"))
        .expect("name drawn");
    let DrawOp::Text { x, y, .. } = name else {
        panic!("name is not text");
    };
    let width = StandardMetrics
        .measure_width("Ana Souza", &config.name_style())
        .expect("measures");
    assert!((x.0 + width.0 / 2.0 - geometry.page_width.0 / 2.0).abs() < 1e-3);
    assert_eq!(*y, geometry.margin);
}

#[test]
fn saved_resumes_export_to_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ResumeStore::open(dir.path().join("resumes.json"));
    let saved = store.save("backend", ana()).expect("saves");

    let loaded = store.get(saved.id).expect("loads");
    let mut sink = DirectorySink::new(dir.path().join("pdf"));
    let filename = export(
        &loaded.document,
        &SectionVisibility::all(),
        &TemplateConfig::default(),
        &FontBook::new(),
        &mut sink,
    )
    .expect("exports");

    assert_eq!(filename, export_filename("Ana Souza"));
    let bytes = std::fs::read(sink.path_of(&filename)).expect("written");
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.trim_ascii_end().ends_with(b"%%EOF"));
}

#[test]
fn long_resumes_spill_onto_more_pages() {
    let mut document = ana();
    let template = document.experiences[0].clone();
    for year in 2000..2015 {
        let mut experience = template.clone();
        experience.is_current = false;
        experience.start_date = format!("{year}-03");
        experience.end_date = format!("{}-02", year + 1);
        experience.description = lipsum::lipsum(80);
        experience.achievements = vec![lipsum::lipsum(30), lipsum::lipsum(30)];
        document.experiences.push(experience);
    }

    let config = TemplateConfig::default();
    let geometry = config.geometry().expect("valid page");
    let layout = layout_resume(
        &document,
        &SectionVisibility::all(),
        geometry,
        &StandardMetrics,
        &config,
    )
    .expect("lays out");

    assert!(layout.page_count() > 1);
    for op in layout.ops.iter() {
        if let Some(y) = op.y() {
            assert!(y <= geometry.bottom(), "{op:?} crosses the bottom margin");
        }
    }
    // the current job still comes first
    let first_range = layout
        .texts()
        .find(|t| t.contains(" - "))
        .expect("a date range");
    assert_eq!(first_range, "01/2020 - Presente");
}
