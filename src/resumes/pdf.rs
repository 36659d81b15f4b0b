use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::error;

use crate::resumes::repo_types::Resume;

/// US letter, in millimetres.
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const LEFT_MARGIN: f32 = 18.0;

/// Legacy free-form content is cut off rather than wrapped.
const LEGACY_CONTENT_LIMIT: usize = 1000;

/// Render a resume to a single fixed-layout PDF page.
///
/// Sections appear in a fixed order: name, summary, skills, experience,
/// education, projects, contact, then the legacy title/content block.
/// Overflowing content runs off the page; pagination is out of scope.
pub fn render(resume: &Resume) -> anyhow::Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new("Resume", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let layer = doc.get_page(page).get_layer(layer);

    let mut y = PAGE_HEIGHT - 20.0;
    layer.use_text(resume.name.clone(), 16.0, Mm(LEFT_MARGIN), Mm(y), &bold);
    y -= 12.0;

    for (label, value) in [
        ("Summary", &resume.summary),
        ("Skills", &resume.skills),
        ("Experience", &resume.experience),
        ("Education", &resume.education),
        ("Projects", &resume.projects),
        ("Contact", &resume.contact),
    ] {
        layer.use_text(
            format!("{label}: {value}"),
            12.0,
            Mm(LEFT_MARGIN),
            Mm(y),
            &regular,
        );
        y -= 8.0;
    }

    if !resume.title.is_empty() {
        y -= 4.0;
        layer.use_text(resume.title.clone(), 14.0, Mm(LEFT_MARGIN), Mm(y), &bold);
        y -= 8.0;
    }
    if !resume.content.is_empty() {
        let excerpt: String = resume.content.chars().take(LEGACY_CONTENT_LIMIT).collect();
        layer.use_text(excerpt, 12.0, Mm(LEFT_MARGIN), Mm(y), &regular);
    }

    doc.save_to_bytes().map_err(|e| {
        error!(error = %e, "pdf serialization failed");
        anyhow::anyhow!(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn sample_resume() -> Resume {
        Resume {
            id: 1,
            user_id: 1,
            name: "Ada Lovelace".into(),
            summary: "Analyst and programmer".into(),
            skills: "Mathematics, computing".into(),
            experience: "Analytical Engine notes".into(),
            education: "Private tutoring".into(),
            projects: "Note G".into(),
            achievements: String::new(),
            strengths: String::new(),
            references: String::new(),
            contact: "ada@example.com".into(),
            title: String::new(),
            content: String::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn render_produces_a_pdf() {
        let bytes = render(&sample_resume()).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn render_with_legacy_fields() {
        let mut resume = sample_resume();
        resume.title = "Old format title".into();
        resume.content = "x".repeat(5000);
        let bytes = render(&resume).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn legacy_truncation_respects_char_boundaries() {
        let mut resume = sample_resume();
        resume.content = "é".repeat(2000);
        let bytes = render(&resume).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
