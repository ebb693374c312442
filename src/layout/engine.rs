use super::ops::{Cursor, DrawOp, Layout};
use crate::config::TemplateConfig;
use crate::date::{format_month_year, format_range};
use crate::error::{CvError, MeasureError};
use crate::font::{FontWeight, TextStyle};
use crate::measure::TextMeasurer;
use crate::pagesize::PageGeometry;
use crate::resume::{Dated, ResumeDocument, SectionKey, SectionVisibility};
use crate::units::Mm;
use tracing::{debug, trace};

/// Distance between consecutive lines of body text
pub const LINE_HEIGHT: Mm = Mm(5.0);
/// Below the name
const NAME_ADVANCE: Mm = Mm(10.0);
/// Below the link line; only [`LINE_HEIGHT`] when there are no links
const LINKS_ADVANCE: Mm = Mm(10.0);
/// From a section title down to its rule
const HEADING_TO_RULE: Mm = Mm(2.0);
/// From any rule down to the text below it
const RULE_TO_CONTENT: Mm = Mm(5.0);
/// After an entry, a section, or the header rule
const GAP: Mm = Mm(5.0);
/// Above the first achievement of an experience
const ACHIEVEMENTS_GAP: Mm = Mm(2.0);
/// Bullet text is set this far right of its bullet
const BULLET_INDENT: Mm = Mm(5.0);

const HEADER_RULE: Mm = Mm(0.5);
const SECTION_RULE: Mm = Mm(0.2);

/// Room a dated entry needs left on the page before it is started
const ENTRY_RESERVE: Mm = Mm(15.0);
/// Room a section needs left on the page before its heading is drawn. Always enough
/// for the heading, its rule and the first entry or line below it.
const OBJECTIVE_RESERVE: Mm = Mm(15.0);
const SKILLS_RESERVE: Mm = Mm(20.0);
const SECTION_RESERVE: Mm = Mm(30.0);

const CONTACT_SEPARATOR: &str = "  |  ";
const SKILL_SEPARATOR: &str = "  •  ";
const BULLET: &str = "•";

/// Lays a [`ResumeDocument`] out on fixed-size pages.
///
/// The composer itself holds nothing but borrowed settings, so one composer can lay out
/// any number of documents. The only state of a layout is its [`Cursor`], which every
/// step takes by value and hands back moved on, while appending what it drew to the
/// output of that one invocation.
pub struct Composer<'a, M: TextMeasurer + ?Sized> {
    measurer: &'a M,
    config: &'a TemplateConfig,
    geometry: PageGeometry,
}

type Step = Result<Cursor, MeasureError>;

impl<'a, M: TextMeasurer + ?Sized> Composer<'a, M> {
    pub fn new(measurer: &'a M, config: &'a TemplateConfig, geometry: PageGeometry) -> Self {
        Composer {
            measurer,
            config,
            geometry,
        }
    }

    /// Lay out the whole document: the header, then each visible, non-empty section
    /// in a fixed order, then the additional sections in document order.
    ///
    /// Any measurement error abandons the layout.
    pub fn compose(
        &self,
        document: &ResumeDocument,
        visibility: &SectionVisibility,
    ) -> Result<Layout, CvError> {
        let mut out: Vec<DrawOp> = Vec::new();
        let mut cursor = self.header(document, Cursor::start(&self.geometry), &mut out)?;

        let labels = &self.config.labels;
        let shown = |key: SectionKey| visibility.is_visible(key);

        if shown(SectionKey::Objective) && !document.objective.trim().is_empty() {
            cursor = self.heading(&labels.objective, OBJECTIVE_RESERVE, cursor, &mut out);
            cursor = self.paragraph(
                &document.objective,
                self.geometry.margin,
                cursor,
                &mut out,
            )?;
            cursor = cursor.advance(GAP);
        }

        let experiences = document.listed_experiences();
        if shown(SectionKey::Experience) && !experiences.is_empty() {
            cursor = self.heading(&labels.experience, SECTION_RESERVE, cursor, &mut out);
            for experience in experiences {
                let subtitle = joined_location(&experience.company, &experience.location);
                cursor = self.dated_entry(
                    &experience.position,
                    &subtitle,
                    experience,
                    &experience.description,
                    &experience.listed_achievements(),
                    cursor,
                    &mut out,
                )?;
            }
        }

        let education = document.listed_education();
        if shown(SectionKey::Education) && !education.is_empty() {
            cursor = self.heading(&labels.education, SECTION_RESERVE, cursor, &mut out);
            for entry in education {
                let title = if entry.field.is_empty() {
                    entry.degree.clone()
                } else {
                    format!("{}{}{}", entry.degree, labels.field_joiner, entry.field)
                };
                let subtitle = joined_location(&entry.institution, &entry.location);
                cursor = self.dated_entry(
                    &title,
                    &subtitle,
                    entry,
                    &entry.description,
                    &[],
                    cursor,
                    &mut out,
                )?;
            }
        }

        let skills = document.listed_skills();
        if shown(SectionKey::Skills) && !skills.is_empty() {
            cursor = self.heading(&labels.skills, SKILLS_RESERVE, cursor, &mut out);
            cursor = self.paragraph(
                &skills.join(SKILL_SEPARATOR),
                self.geometry.margin,
                cursor,
                &mut out,
            )?;
            cursor = cursor.advance(GAP);
        }

        let languages = document.listed_languages();
        if shown(SectionKey::Languages) && !languages.is_empty() {
            cursor = self.heading(&labels.languages, SECTION_RESERVE, cursor, &mut out);
            let normal = self.config.body_style(FontWeight::Normal);
            for language in languages {
                let line = match language.proficiency_level {
                    Some(level) => format!(
                        "{BULLET} {} ({})",
                        language.language_name,
                        labels.proficiency(level)
                    ),
                    None => format!("{BULLET} {}", language.language_name),
                };
                cursor = self.room_for(Mm(0.0), cursor, &mut out);
                self.text(&line, self.geometry.margin, cursor, normal, &mut out);
                cursor = cursor.advance(LINE_HEIGHT);
            }
            cursor = cursor.advance(GAP);
        }

        let certifications = document.listed_certifications();
        if shown(SectionKey::Certifications) && !certifications.is_empty() {
            cursor = self.heading(&labels.certifications, SECTION_RESERVE, cursor, &mut out);
            let bold = self.config.body_style(FontWeight::Bold);
            let normal = self.config.body_style(FontWeight::Normal);
            for certification in certifications {
                cursor = self.room_for(Mm(0.0), cursor, &mut out);

                self.text(&certification.name, self.geometry.margin, cursor, bold, &mut out);
                if !certification.issuer.is_empty() {
                    let name_width = self.measurer.measure_width(&certification.name, &bold)?;
                    self.text(
                        &format!(" - {}", certification.issuer),
                        self.geometry.margin + name_width,
                        cursor,
                        normal,
                        &mut out,
                    );
                }
                let date = format_month_year(&certification.date);
                if !date.is_empty() {
                    self.right_aligned(&date, cursor, normal, &mut out)?;
                }

                cursor = cursor.advance(LINE_HEIGHT);
            }
            cursor = cursor.advance(GAP);
        }

        for (section, items) in document.listed_additional_sections() {
            cursor = self.heading(&section.title, SECTION_RESERVE, cursor, &mut out);
            for item in items {
                cursor = self.bulleted(item, cursor, &mut out)?;
            }
            cursor = cursor.advance(GAP);
        }

        let layout = Layout {
            geometry: self.geometry,
            ops: out,
        };
        debug!(
            pages = layout.page_count(),
            ops = layout.ops.len(),
            final_y = cursor.y.0,
            "composed résumé"
        );
        Ok(layout)
    }

    /// Name, contact line, link line and the full-width rule under them
    fn header(&self, document: &ResumeDocument, cursor: Cursor, out: &mut Vec<DrawOp>) -> Step {
        let personal = &document.personal;
        let labels = &self.config.labels;
        let normal = self.config.body_style(FontWeight::Normal);

        let cursor = self.room_for(Mm(0.0), cursor, out);
        self.centered(&personal.name, cursor, self.config.name_style(), out)?;
        let mut cursor = cursor.advance(NAME_ADVANCE);

        let contacts = labelled(&[
            (&labels.email, &personal.email),
            (&labels.phone, &personal.phone),
            (&labels.location, &personal.location),
        ]);
        if !contacts.is_empty() {
            cursor = self.room_for(Mm(0.0), cursor, out);
            self.centered(&contacts.join(CONTACT_SEPARATOR), cursor, normal, out)?;
            cursor = cursor.advance(LINE_HEIGHT);
        }

        let links = labelled(&[
            (&labels.profile, &personal.profile_url),
            (&labels.portfolio, &personal.portfolio_url),
        ]);
        if links.is_empty() {
            cursor = cursor.advance(LINE_HEIGHT);
        } else {
            cursor = self.room_for(Mm(0.0), cursor, out);
            self.centered(&links.join(CONTACT_SEPARATOR), cursor, normal, out)?;
            cursor = cursor.advance(LINKS_ADVANCE);
        }

        cursor = self.room_for(Mm(0.0), cursor, out);
        self.rule(cursor, HEADER_RULE, out);
        Ok(cursor.advance(GAP))
    }

    /// Uppercased title and the thin rule under it. The title is only drawn once
    /// `reserve` is left on the page, so the rule and the first line of the section
    /// always land on the same page as the title.
    fn heading(&self, title: &str, reserve: Mm, cursor: Cursor, out: &mut Vec<DrawOp>) -> Cursor {
        let cursor = self.room_for(reserve, cursor, out);
        debug!(section = title, page = cursor.page, y = cursor.y.0, "section heading");

        self.text(
            &title.to_uppercase(),
            self.geometry.margin,
            cursor,
            self.config.heading_style(),
            out,
        );
        let cursor = cursor.advance(HEADING_TO_RULE);
        self.rule(cursor, SECTION_RULE, out);
        cursor.advance(RULE_TO_CONTENT)
    }

    /// One experience or education entry: title and date range, organisation line,
    /// description and bulleted achievements
    #[allow(clippy::too_many_arguments)]
    fn dated_entry(
        &self,
        title: &str,
        subtitle: &str,
        dates: &dyn Dated,
        description: &str,
        achievements: &[&str],
        cursor: Cursor,
        out: &mut Vec<DrawOp>,
    ) -> Step {
        let bold = self.config.body_style(FontWeight::Bold);
        let normal = self.config.body_style(FontWeight::Normal);

        let cursor = self.room_for(ENTRY_RESERVE, cursor, out);
        self.text(title, self.geometry.margin, cursor, bold, out);
        let range = format_range(
            dates.start_date(),
            dates.effective_end_date(),
            &self.config.labels.present,
        );
        self.right_aligned(&range, cursor, normal, out)?;
        let cursor = cursor.advance(LINE_HEIGHT);

        let cursor = self.room_for(Mm(0.0), cursor, out);
        self.text(subtitle, self.geometry.margin, cursor, bold, out);
        let mut cursor = cursor.advance(LINE_HEIGHT);

        if !description.trim().is_empty() {
            cursor = self.paragraph(description, self.geometry.margin, cursor, out)?;
        }

        if !achievements.is_empty() {
            cursor = cursor.advance(ACHIEVEMENTS_GAP);
            for achievement in achievements {
                cursor = self.bulleted(achievement, cursor, out)?;
            }
        }

        Ok(cursor.advance(GAP))
    }

    /// Wrapped body text from `x` to the right margin, one page-break check per line
    fn paragraph(&self, text: &str, x: Mm, cursor: Cursor, out: &mut Vec<DrawOp>) -> Step {
        let normal = self.config.body_style(FontWeight::Normal);
        let width = self.geometry.right() - x;
        let lines = self.measurer.wrap_to_width(text, &normal, width)?;

        let mut cursor = cursor;
        for line in lines {
            cursor = self.room_for(Mm(0.0), cursor, out);
            self.text(&line, x, cursor, normal, out);
            cursor = cursor.advance(LINE_HEIGHT);
        }
        Ok(cursor)
    }

    /// A bullet at the margin with the wrapped item indented beside it
    fn bulleted(&self, item: &str, cursor: Cursor, out: &mut Vec<DrawOp>) -> Step {
        let normal = self.config.body_style(FontWeight::Normal);
        let cursor = self.room_for(Mm(0.0), cursor, out);
        self.text(BULLET, self.geometry.margin, cursor, normal, out);
        self.paragraph(item, self.geometry.margin + BULLET_INDENT, cursor, out)
    }

    /// Breaks to a new page unless `extent` more fits above the bottom margin. A fresh
    /// page is never broken again.
    fn room_for(&self, extent: Mm, cursor: Cursor, out: &mut Vec<DrawOp>) -> Cursor {
        if cursor.y + extent <= self.geometry.bottom() || cursor.y <= self.geometry.margin {
            return cursor;
        }

        trace!(page = cursor.page, y = cursor.y.0, extent = extent.0, "page break");
        out.push(DrawOp::PageBreak);
        Cursor {
            page: cursor.page + 1,
            y: self.geometry.margin,
        }
    }

    /// Empty strings draw nothing and are left out of the stream
    fn text(&self, content: &str, x: Mm, cursor: Cursor, style: TextStyle, out: &mut Vec<DrawOp>) {
        if content.is_empty() {
            return;
        }
        out.push(DrawOp::Text {
            content: content.to_string(),
            x,
            y: cursor.y,
            font: style.family,
            weight: style.weight,
            size: style.size,
        });
    }

    fn centered(
        &self,
        content: &str,
        cursor: Cursor,
        style: TextStyle,
        out: &mut Vec<DrawOp>,
    ) -> Result<(), MeasureError> {
        let width = self.measurer.measure_width(content, &style)?;
        let x = (self.geometry.page_width - width) / 2.0;
        self.text(content, x, cursor, style, out);
        Ok(())
    }

    fn right_aligned(
        &self,
        content: &str,
        cursor: Cursor,
        style: TextStyle,
        out: &mut Vec<DrawOp>,
    ) -> Result<(), MeasureError> {
        let width = self.measurer.measure_width(content, &style)?;
        self.text(content, self.geometry.right() - width, cursor, style, out);
        Ok(())
    }

    fn rule(&self, cursor: Cursor, thickness: Mm, out: &mut Vec<DrawOp>) {
        out.push(DrawOp::Rule {
            x1: self.geometry.margin,
            y: cursor.y,
            x2: self.geometry.right(),
            thickness,
        });
    }
}

/// `"{what} | {location}"`, or just `what` without a location
fn joined_location(what: &str, location: &str) -> String {
    if location.is_empty() {
        what.to_string()
    } else {
        format!("{what} | {location}")
    }
}

/// `"{label}{value}"` for every present value
fn labelled(fields: &[(&String, &String)]) -> Vec<String> {
    fields
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}{value}"))
        .collect()
}

/// Lay out a résumé with a throwaway [`Composer`]
pub fn layout_resume<M: TextMeasurer + ?Sized>(
    document: &ResumeDocument,
    visibility: &SectionVisibility,
    geometry: PageGeometry,
    measurer: &M,
    config: &TemplateConfig,
) -> Result<Layout, CvError> {
    Composer::new(measurer, config, geometry).compose(document, visibility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFamily;
    use crate::metrics::StandardMetrics;
    use crate::resume::{
        AdditionalSection, Certification, Education, Experience, Language, PersonalInfo,
        Proficiency,
    };
    use crate::units::Pt;

    /// Every character is 2mm wide, whatever the style
    struct Fixed;

    impl TextMeasurer for Fixed {
        fn measure_width(&self, text: &str, _style: &TextStyle) -> Result<Mm, MeasureError> {
            Ok(Mm(2.0 * text.chars().count() as f32))
        }
    }

    /// Fails to measure anything bold
    struct NoBold;

    impl TextMeasurer for NoBold {
        fn measure_width(&self, text: &str, style: &TextStyle) -> Result<Mm, MeasureError> {
            match style.weight {
                FontWeight::Bold => Err(MeasureError::FontNotLoaded {
                    family: style.family,
                    weight: style.weight,
                }),
                FontWeight::Normal => Ok(Mm(text.len() as f32)),
            }
        }
    }

    fn a4() -> PageGeometry {
        PageGeometry::new(Mm(210.0), Mm(297.0), Mm(20.0)).expect("valid")
    }

    fn compose(document: &ResumeDocument, visibility: &SectionVisibility) -> Layout {
        let config = TemplateConfig::default();
        layout_resume(document, visibility, a4(), &Fixed, &config).expect("lays out")
    }

    fn named(name: &str) -> ResumeDocument {
        ResumeDocument {
            personal: PersonalInfo {
                name: name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn find<'l>(layout: &'l Layout, content: &str) -> &'l DrawOp {
        layout
            .ops
            .iter()
            .find(|op| op.text() == Some(content))
            .unwrap_or_else(|| panic!("no text op {content:?} in {:#?}", layout.ops))
    }

    fn position(op: &DrawOp) -> (f32, f32) {
        match op {
            DrawOp::Text { x, y, .. } => (x.0, y.0),
            other => panic!("not a text op: {other:?}"),
        }
    }

    fn assert_paginated(layout: &Layout) {
        let bottom = layout.geometry.bottom();
        for op in layout.ops.iter() {
            if let Some(y) = op.y() {
                assert!(y <= bottom, "{op:?} is below the bottom margin");
            }
        }
    }

    fn long_experience(company: &str, start: &str) -> Experience {
        Experience {
            company: company.to_string(),
            position: "Engineer".to_string(),
            start_date: start.to_string(),
            description: lipsum::lipsum(60),
            achievements: vec![lipsum::lipsum(25), lipsum::lipsum(25), lipsum::lipsum(25)],
            ..Default::default()
        }
    }

    #[test]
    fn empty_document_is_just_a_header() {
        let layout = compose(&named("Ana Souza"), &SectionVisibility::all());
        assert_eq!(
            layout.ops,
            vec![
                DrawOp::Text {
                    content: "Ana Souza".to_string(),
                    x: Mm((210.0 - 18.0) / 2.0),
                    y: Mm(20.0),
                    font: FontFamily::Times,
                    weight: FontWeight::Bold,
                    size: Pt(18.0),
                },
                DrawOp::Rule {
                    x1: Mm(20.0),
                    y: Mm(35.0),
                    x2: Mm(190.0),
                    thickness: HEADER_RULE,
                },
            ]
        );
    }

    #[test]
    fn header_joins_contacts_and_links() {
        let mut document = named("Ana");
        document.personal.email = "ana@example.com".to_string();
        document.personal.location = "Recife".to_string();
        document.personal.portfolio_url = "ana.dev".to_string();
        let layout = compose(&document, &SectionVisibility::all());

        let contacts = find(&layout, "E-mail: ana@example.com  |  Localização: Recife");
        assert_eq!(position(contacts).1, 30.0);
        let links = find(&layout, "Portfolio: ana.dev");
        assert_eq!(position(links).1, 35.0);
        assert!(matches!(
            layout.ops.last(),
            Some(DrawOp::Rule { y, .. }) if *y == Mm(45.0)
        ));
    }

    #[test]
    fn current_experience_ends_at_present() {
        let mut document = named("Ana");
        document.experiences.push(Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            location: "Remote".to_string(),
            start_date: "2020-01".to_string(),
            end_date: "2023-04".to_string(),
            is_current: true,
            ..Default::default()
        });
        let layout = compose(&document, &SectionVisibility::all());

        let range = find(&layout, "01/2020 - Presente");
        let title = find(&layout, "Engineer");
        assert_eq!(position(range).1, position(title).1);
        // right-aligned against the right margin
        assert_eq!(position(range).0, 190.0 - 2.0 * 18.0);
        find(&layout, "Acme | Remote");
        find(&layout, "EXPERIÊNCIA PROFISSIONAL");
    }

    #[test]
    fn hidden_sections_are_omitted() {
        let mut document = named("Ana");
        document.objective = "Build things".to_string();
        document.languages.push(Language {
            language_name: "English".to_string(),
            proficiency_level: Some(Proficiency::Fluent),
        });
        document.skills = vec!["Go".to_string()];

        let mut visibility = SectionVisibility::default();
        visibility.set(SectionKey::Languages, true);
        let layout = compose(&document, &visibility);

        let texts: Vec<&str> = layout.texts().collect();
        assert!(!texts.contains(&"OBJETIVO PROFISSIONAL"));
        assert!(!texts.contains(&"Build things"));
        assert!(texts.contains(&"IDIOMAS"));
        assert!(texts.contains(&"• English (Fluente)"));
        // skills cannot be hidden
        assert!(texts.contains(&"HABILIDADES"));
        assert!(texts.contains(&"Go"));
    }

    #[test]
    fn sections_follow_the_fixed_order() {
        let mut document = named("Ana");
        document.additional_sections.push(AdditionalSection {
            title: "Voluntariado".to_string(),
            content: vec!["Ensino de programação".to_string()],
        });
        document.certifications.push(Certification {
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date: "2022-03".to_string(),
            url: None,
        });
        document.education.push(Education {
            institution: "UFPE".to_string(),
            degree: "Bacharelado".to_string(),
            field: "Computação".to_string(),
            start_date: "2012-02".to_string(),
            end_date: "2016-12".to_string(),
            ..Default::default()
        });
        document.skills = vec!["Go".to_string(), "Rust".to_string()];
        document.objective = "Build reliable systems".to_string();

        let layout = compose(&document, &SectionVisibility::all());
        let headings: Vec<&str> = layout
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, size, .. } if *size == Pt(14.0) => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            headings,
            vec![
                "OBJETIVO PROFISSIONAL",
                "FORMAÇÃO ACADÊMICA",
                "HABILIDADES",
                "CERTIFICAÇÕES",
                "VOLUNTARIADO",
            ]
        );
        find(&layout, "Bacharelado em Computação");
        find(&layout, "02/2012 - 12/2016");
        find(&layout, "Go  •  Rust");
    }

    #[test]
    fn certification_issuer_follows_the_name() {
        let mut document = named("Ana");
        document.certifications.push(Certification {
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date: "2022-03".to_string(),
            url: None,
        });
        document.certifications.push(Certification {
            name: String::new(),
            issuer: "AWS".to_string(),
            date: "soon".to_string(),
            url: None,
        });
        let layout = compose(&document, &SectionVisibility::all());

        let (name_x, name_y) = position(find(&layout, "CKA"));
        let (issuer_x, issuer_y) = position(find(&layout, " - CNCF"));
        assert_eq!(issuer_x, name_x + 6.0);
        assert_eq!(issuer_y, name_y);
        let (date_x, _) = position(find(&layout, "03/2022"));
        assert_eq!(date_x, 190.0 - 14.0);

        // nameless certifications still list their issuer, at the margin
        let (aws_x, aws_y) = position(find(&layout, " - AWS"));
        assert_eq!(aws_x, 20.0);
        assert_eq!(aws_y, name_y + 5.0);
    }

    #[test]
    fn achievements_are_bulleted_and_indented() {
        let mut document = named("Ana");
        document.experiences.push(Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            achievements: vec!["Shipped it".to_string(), "  ".to_string()],
            ..Default::default()
        });
        let layout = compose(&document, &SectionVisibility::all());

        let (x, y) = position(find(&layout, "Shipped it"));
        assert_eq!(x, 25.0);
        let bullets: Vec<&DrawOp> = layout
            .ops
            .iter()
            .filter(|op| op.text() == Some(BULLET))
            .collect();
        assert_eq!(bullets.len(), 1);
        assert_eq!(position(bullets[0]), (20.0, y));
    }

    #[test]
    fn long_documents_paginate_within_the_margins() {
        let mut document = named("Ana");
        for year in 2000..2012 {
            document
                .experiences
                .push(long_experience(&format!("Company {year}"), &format!("{year}-01")));
        }
        document.skills = (0..200).map(|i| format!("skill-{i}")).collect();
        let layout = compose(&document, &SectionVisibility::all());

        assert!(layout.page_count() > 2);
        assert_paginated(&layout);
        // newest first
        let companies: Vec<&str> = layout
            .texts()
            .filter(|t| t.starts_with("Company "))
            .collect();
        assert_eq!(companies.first(), Some(&"Company 2011"));
        assert_eq!(companies.last(), Some(&"Company 2000"));
    }

    #[test]
    fn headings_keep_their_rule_and_first_line() {
        let mut document = named("Ana");
        for year in 2000..2006 {
            document
                .experiences
                .push(long_experience(&format!("Company {year}"), &format!("{year}-01")));
        }
        for i in 0..8 {
            document.additional_sections.push(AdditionalSection {
                title: format!("Extra {i}"),
                content: vec![lipsum::lipsum(40)],
            });
        }
        let layout = compose(&document, &SectionVisibility::all());
        assert_paginated(&layout);

        for (i, op) in layout.ops.iter().enumerate() {
            if let DrawOp::Text { size, .. } = op {
                if *size == Pt(14.0) {
                    assert!(
                        matches!(layout.ops.get(i + 1), Some(DrawOp::Rule { .. })),
                        "heading {op:?} not followed by its rule"
                    );
                    assert!(
                        matches!(layout.ops.get(i + 2), Some(DrawOp::Text { .. })),
                        "heading {op:?} separated from its content"
                    );
                }
            }
        }
    }

    #[test]
    fn measurement_failures_abort_the_layout() {
        let config = TemplateConfig::default();
        let result = layout_resume(
            &named("Ana"),
            &SectionVisibility::all(),
            a4(),
            &NoBold,
            &config,
        );
        assert!(matches!(result, Err(CvError::Measure(_))));
    }

    #[test]
    fn standard_metrics_center_the_name() {
        let config = TemplateConfig::default();
        let layout = layout_resume(
            &named("Ana Souza"),
            &SectionVisibility::all(),
            a4(),
            &StandardMetrics,
            &config,
        )
        .expect("lays out");
        let width = StandardMetrics
            .measure_width("Ana Souza", &config.name_style())
            .expect("measures");
        let (x, _) = position(find(&layout, "Ana Souza"));
        assert!((x + width.0 / 2.0 - 105.0).abs() < 1e-3);
    }
}
