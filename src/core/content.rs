//! Case-study content model — gallery items, narrative blocks, and the
//! line-oriented project file format.
//!
//! Content is constructed once at startup (built-in demo or parsed from a
//! file) and is immutable afterward. The engine only reads ids, ordering,
//! and section structure; rendering the copy itself is the UI's job.

use thiserror::Error;

/// Display size class of a gallery image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSize {
    Big,
    Small,
    /// Placeholder slot — excluded from the gallery entirely.
    Empty,
}

impl ItemSize {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "big" => Some(ItemSize::Big),
            "small" => Some(ItemSize::Small),
            "empty" => Some(ItemSize::Empty),
            _ => None,
        }
    }
}

/// One image in the gallery. Array order defines snap-point ordering.
#[derive(Debug, Clone)]
pub struct GalleryItem {
    /// Stable id, also the trigger id narrative sections point at.
    pub id: String,
    /// Asset reference (shown as text — no image decoding here).
    pub src: String,
    pub size: ItemSize,
}

/// A labeled narrative section tied to a gallery item. Its paragraphs
/// expand when the item is active and collapse otherwise.
#[derive(Debug, Clone)]
pub struct PivotSection {
    pub heading: String,
    /// Gallery item id this section tracks.
    pub target_id: String,
    pub paragraphs: Vec<String>,
}

/// One display block in the narrative pane.
#[derive(Debug, Clone)]
pub enum NarrativeBlock {
    /// Plain always-visible paragraphs.
    Text(Vec<String>),
    /// A run of pivot sections with conditional content.
    PivotGroup(Vec<PivotSection>),
}

/// A complete case study.
#[derive(Debug, Clone)]
pub struct ProjectData {
    pub title: String,
    pub subtitle: String,
    /// Label/value pairs shown below the narrative.
    pub meta: Vec<(String, String)>,
    /// All declared images, placeholders included.
    pub images: Vec<GalleryItem>,
    pub narrative: Vec<NarrativeBlock>,
}

/// Errors from parsing a project file.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("line {line}: unknown directive `{directive}`")]
    UnknownDirective { line: usize, directive: String },
    #[error("line {line}: malformed `{directive}` entry")]
    Malformed { line: usize, directive: &'static str },
    #[error("line {line}: unknown image size `{size}` (expected big, small, or empty)")]
    BadSize { line: usize, size: String },
    #[error("line {line}: pivot references unknown image `{id}`")]
    UnknownImage { line: usize, id: String },
    #[error("line {line}: paragraph for `{id}` has no preceding pivot")]
    OrphanParagraph { line: usize, id: String },
    #[error("project declares no visible gallery images")]
    EmptyGallery,
}

impl ProjectData {
    /// Visible gallery items, in snap order.
    pub fn gallery(&self) -> Vec<&GalleryItem> {
        self.images
            .iter()
            .filter(|img| img.size != ItemSize::Empty)
            .collect()
    }

    /// Index of a visible gallery item by id.
    pub fn gallery_index(&self, id: &str) -> Option<usize> {
        self.gallery().iter().position(|img| img.id == id)
    }

    /// All pivot sections in narrative order.
    pub fn pivots(&self) -> Vec<&PivotSection> {
        self.narrative
            .iter()
            .flat_map(|block| match block {
                NarrativeBlock::PivotGroup(items) => items.iter().collect::<Vec<_>>(),
                NarrativeBlock::Text(_) => Vec::new(),
            })
            .collect()
    }

    /// Parse the line-oriented project format.
    ///
    /// ```text
    /// title: ...
    /// subtitle: ...
    /// meta: Label = Value
    /// image: <id> <big|small|empty> <src>
    /// pivot: <image-id> | <heading>
    /// para: <image-id> | <paragraph>
    /// text: <paragraph>
    /// ```
    ///
    /// Blank lines and `#` comments are skipped. `para` lines attach to the
    /// `pivot` previously declared for the same image id.
    pub fn parse(source: &str) -> Result<Self, ContentError> {
        let mut title = String::new();
        let mut subtitle = String::new();
        let mut meta = Vec::new();
        let mut images: Vec<GalleryItem> = Vec::new();
        let mut intro: Vec<String> = Vec::new();
        let mut pivots: Vec<PivotSection> = Vec::new();

        for (idx, raw) in source.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((directive, rest)) = line.split_once(':') else {
                return Err(ContentError::UnknownDirective {
                    line: line_no,
                    directive: line.to_string(),
                });
            };
            let rest = rest.trim();

            match directive.trim() {
                "title" => title = rest.to_string(),
                "subtitle" => subtitle = rest.to_string(),
                "meta" => {
                    let Some((label, value)) = rest.split_once('=') else {
                        return Err(ContentError::Malformed {
                            line: line_no,
                            directive: "meta",
                        });
                    };
                    meta.push((label.trim().to_string(), value.trim().to_string()));
                }
                "image" => {
                    let mut parts = rest.splitn(3, char::is_whitespace);
                    let (Some(id), Some(size), Some(src)) =
                        (parts.next(), parts.next(), parts.next())
                    else {
                        return Err(ContentError::Malformed {
                            line: line_no,
                            directive: "image",
                        });
                    };
                    let size = ItemSize::parse(size).ok_or_else(|| ContentError::BadSize {
                        line: line_no,
                        size: size.to_string(),
                    })?;
                    images.push(GalleryItem {
                        id: id.to_string(),
                        src: src.trim().to_string(),
                        size,
                    });
                }
                "pivot" => {
                    let (id, heading) = split_piped(rest).ok_or(ContentError::Malformed {
                        line: line_no,
                        directive: "pivot",
                    })?;
                    if !images.iter().any(|img| img.id == id) {
                        return Err(ContentError::UnknownImage {
                            line: line_no,
                            id: id.to_string(),
                        });
                    }
                    pivots.push(PivotSection {
                        heading: heading.to_string(),
                        target_id: id.to_string(),
                        paragraphs: Vec::new(),
                    });
                }
                "para" => {
                    let (id, text) = split_piped(rest).ok_or(ContentError::Malformed {
                        line: line_no,
                        directive: "para",
                    })?;
                    let Some(section) = pivots.iter_mut().rev().find(|p| p.target_id == id)
                    else {
                        return Err(ContentError::OrphanParagraph {
                            line: line_no,
                            id: id.to_string(),
                        });
                    };
                    section.paragraphs.push(text.to_string());
                }
                "text" => intro.push(rest.to_string()),
                other => {
                    return Err(ContentError::UnknownDirective {
                        line: line_no,
                        directive: other.to_string(),
                    });
                }
            }
        }

        if !images.iter().any(|img| img.size != ItemSize::Empty) {
            return Err(ContentError::EmptyGallery);
        }

        let mut narrative = Vec::new();
        if !intro.is_empty() {
            narrative.push(NarrativeBlock::Text(intro));
        }
        if !pivots.is_empty() {
            narrative.push(NarrativeBlock::PivotGroup(pivots));
        }

        Ok(Self {
            title,
            subtitle,
            meta,
            images,
            narrative,
        })
    }

    /// The built-in demo case study.
    pub fn demo() -> Self {
        Self {
            title: "LuckBros Mural Visual Design".into(),
            subtitle: "AIGC INTEGRATED SPATIAL DESIGN".into(),
            meta: vec![
                ("Cooperator".into(), "Rising Formula".into()),
                ("Type".into(), "Mural & Branding".into()),
            ],
            images: vec![
                GalleryItem {
                    id: "header".into(),
                    src: "projects/case9/1.jpg".into(),
                    size: ItemSize::Big,
                },
                GalleryItem {
                    id: "main-mural".into(),
                    src: "projects/case9/2.jpg".into(),
                    size: ItemSize::Big,
                },
                GalleryItem {
                    id: "artifacts".into(),
                    src: "projects/case9/3.jpg".into(),
                    size: ItemSize::Big,
                },
                GalleryItem {
                    id: "process-1".into(),
                    src: "projects/case9/4.jpg".into(),
                    size: ItemSize::Small,
                },
            ],
            narrative: vec![
                NarrativeBlock::Text(vec![
                    "LuckBros approached us with a blank forty-metre wall and a short \
                     brief: make the space feel like the brand. The mural had to read \
                     from across the street, hold up at arm's length, and survive being \
                     photographed a thousand times a week, so every decision started \
                     from how people would actually move past it."
                        .into(),
                    "We treated the wall as a sequence rather than a single image. \
                     Visitors walk it left to right, so the composition unfolds in \
                     chapters, each anchored by one hero motif and a supporting field \
                     of detail that rewards a closer look."
                        .into(),
                    "AI image generation entered the process as a sketching tool. \
                     Instead of three concept boards we brought thirty, and the \
                     conversation with the client shifted from approving a direction \
                     to curating one. The final artwork was still drawn, corrected, \
                     and coloured by hand."
                        .into(),
                    "The sections below walk through the finished mural and the \
                     artifacts that grew out of it, in the order the work actually \
                     happened."
                        .into(),
                ]),
                NarrativeBlock::PivotGroup(vec![
                    PivotSection {
                        heading: "Unlock greater impact by integrating AI".into(),
                        target_id: "header".into(),
                        paragraphs: vec![
                            "When we started the project, I thought AI would simply help speed \
                             things up. What I didn't expect was how much better the results \
                             would turn out, not just for me but for the clients too."
                                .into(),
                            "The clients themselves saw the potential beyond the original mural. \
                             Instead of stopping there, they recognized the work could live on \
                             as brand visuals."
                                .into(),
                        ],
                    },
                    PivotSection {
                        heading: "Better quality, faster communication".into(),
                        target_id: "main-mural".into(),
                        paragraphs: vec![
                            "The ability to generate samples quickly changed the way we worked \
                             together. Clients and teammates could see visuals almost \
                             instantly, making discussions smoother and iterations faster."
                                .into(),
                            "Communication became easier, and the quality of the work improved \
                             because everyone could respond in real time."
                                .into(),
                        ],
                    },
                    PivotSection {
                        heading: "Details stacked on details".into(),
                        target_id: "artifacts".into(),
                        paragraphs: vec![
                            "Details used to feel like a trap that consumed time and left no \
                             room to think. With support in the process, they became something \
                             to embrace: layered facets, print-ready enlargements, a style \
                             kept consistent throughout."
                                .into(),
                            "What used to feel like detail hell turned into a space for \
                             thoughtful balance and refinement."
                                .into(),
                        ],
                    },
                    PivotSection {
                        heading: "From murals to full brand visuals".into(),
                        target_id: "process-1".into(),
                        paragraphs: vec![
                            "As the project progressed, teammates and clients grew increasingly \
                             happy with how the design was shaping up. They began to see its \
                             potential not just as a mural but as a flexible brand visual."
                                .into(),
                            "What started as a single mural was accepted as one of the major \
                             brand visual materials, carrying the story far beyond the wall."
                                .into(),
                        ],
                    },
                ]),
            ],
        }
    }
}

/// Split `"<id> | <text>"` into its two halves.
fn split_piped(s: &str) -> Option<(&str, &str)> {
    let (id, text) = s.split_once('|')?;
    let id = id.trim();
    let text = text.trim();
    if id.is_empty() || text.is_empty() {
        return None;
    }
    Some((id, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# sample project
title: Test Project
subtitle: A SUBTITLE
meta: Client = Acme

image: one big shots/1.jpg
image: two small shots/2.jpg
image: gap empty -

pivot: one | First heading
para: one | First paragraph.
para: one | Second paragraph.
pivot: two | Second heading
para: two | Only paragraph.
";

    #[test]
    fn parses_sample_project() {
        let project = ProjectData::parse(SAMPLE).unwrap();
        assert_eq!(project.title, "Test Project");
        assert_eq!(project.meta, vec![("Client".into(), "Acme".into())]);
        assert_eq!(project.images.len(), 3);
        // Empty placeholders never reach the gallery.
        assert_eq!(project.gallery().len(), 2);
        assert_eq!(project.gallery_index("two"), Some(1));

        let pivots = project.pivots();
        assert_eq!(pivots.len(), 2);
        assert_eq!(pivots[0].paragraphs.len(), 2);
        assert_eq!(pivots[1].target_id, "two");
    }

    #[test]
    fn pivot_must_reference_a_declared_image() {
        let src = "image: a big 1.jpg\npivot: missing | Heading\n";
        let err = ProjectData::parse(src).unwrap_err();
        assert!(matches!(err, ContentError::UnknownImage { .. }));
    }

    #[test]
    fn para_needs_a_preceding_pivot() {
        let src = "image: a big 1.jpg\npara: a | Orphan paragraph\n";
        let err = ProjectData::parse(src).unwrap_err();
        assert!(matches!(err, ContentError::OrphanParagraph { .. }));
    }

    #[test]
    fn rejects_all_empty_gallery() {
        let src = "title: x\nimage: a empty -\n";
        assert!(matches!(
            ProjectData::parse(src).unwrap_err(),
            ContentError::EmptyGallery
        ));
    }

    #[test]
    fn rejects_unknown_size() {
        let src = "image: a huge 1.jpg\n";
        assert!(matches!(
            ProjectData::parse(src).unwrap_err(),
            ContentError::BadSize { .. }
        ));
    }

    #[test]
    fn demo_pivots_all_resolve() {
        let demo = ProjectData::demo();
        for pivot in demo.pivots() {
            assert!(
                demo.gallery_index(&pivot.target_id).is_some(),
                "unresolved pivot target {}",
                pivot.target_id
            );
        }
    }
}
