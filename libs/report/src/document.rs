use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    /// Level 1 is the largest.
    Heading { text: String, level: u8, align: Align },
    Paragraph { text: String, align: Align },
    Spacer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl ReportDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn heading(&mut self, text: impl Into<String>, level: u8) -> &mut Self {
        self.aligned_heading(text, level, Align::Left)
    }

    pub fn aligned_heading(&mut self, text: impl Into<String>, level: u8, align: Align) -> &mut Self {
        self.blocks.push(Block::Heading {
            text: text.into(),
            level: level.clamp(1, 3),
            align,
        });
        self
    }

    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.aligned_paragraph(text, Align::Left)
    }

    pub fn aligned_paragraph(&mut self, text: impl Into<String>, align: Align) -> &mut Self {
        self.blocks.push(Block::Paragraph {
            text: text.into(),
            align,
        });
        self
    }

    pub fn spacer(&mut self) -> &mut Self {
        self.blocks.push(Block::Spacer);
        self
    }

    /// Texts of all headings, in order.
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// One line per block; spacers become empty lines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| match b {
                Block::Heading { text, .. } | Block::Paragraph { text, .. } => text.as_str(),
                Block::Spacer => "",
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Blocks that follow the heading `text` up to the next heading of the same
    /// or a higher level.
    pub fn section(&self, text: &str) -> Option<&[Block]> {
        let (start, level) = self.blocks.iter().enumerate().find_map(|(i, b)| match b {
            Block::Heading { text: t, level, .. } if t == text => Some((i, *level)),
            _ => None,
        })?;
        let rest = &self.blocks[start + 1..];
        let end = rest
            .iter()
            .position(|b| matches!(b, Block::Heading { level: l, .. } if *l <= level))
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }
}
