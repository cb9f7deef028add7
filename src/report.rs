use std::fmt;

use crate::error::Error;
use crate::model::DocumentImageIndex;

/// Pretty-printed JSON of the whole index.
pub fn to_json(index: &DocumentImageIndex) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(index)?)
}

/// Human-readable summary: totals, then one line per drawing.
pub fn summary(index: &DocumentImageIndex) -> String {
    Summary(index).to_string()
}

/// [`Display`](fmt::Display) form of [`summary`], for writing straight to a stream.
pub struct Summary<'a>(pub &'a DocumentImageIndex);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = self.0;
        writeln!(f, "Document part: {}", index.document_part())?;
        writeln!(f, "Relationships: {}", index.rels_part().unwrap_or("(none)"))?;
        writeln!(f, "Paragraphs:    {}", index.num_paras())?;
        writeln!(
            f,
            "Images:        {} in {} paragraph(s), {} unresolved",
            index.num_images(),
            index.image_paragraphs().len(),
            index.unresolved().count()
        )?;

        for para in index.paragraphs().values() {
            write!(f, "\nParagraph {}", para.index)?;
            if !para.para_id.is_empty() {
                write!(f, " [{}]", para.para_id)?;
            }
            writeln!(f, " ({} run(s), {} image(s))", para.run_count, para.image_count())?;

            for run in para.runs.values() {
                for drawing in &run.drawings {
                    let rel = drawing.rel_id.as_deref().unwrap_or("-");
                    let target = if drawing.is_resolved() {
                        drawing.target.as_str()
                    } else {
                        "(unresolved)"
                    };
                    writeln!(f, "  run {:>3}  {:<8} {}", run.index, rel, target)?;
                }
            }
        }
        Ok(())
    }
}
