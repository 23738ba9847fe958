use orrery_engine::geometry::PrimitiveKind;

/// Drawing mode selected with the space key.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PrimitiveMode {
    #[default]
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleFan,
    TriangleStrip,
}

impl PrimitiveMode {
    /// All modes in cycling order.
    pub const ALL: [PrimitiveMode; 7] = [
        Self::Points,
        Self::Lines,
        Self::LineStrip,
        Self::LineLoop,
        Self::Triangles,
        Self::TriangleFan,
        Self::TriangleStrip,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Mode at `index`, wrapping past the last one.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// The following mode; the last one wraps to `Points`.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Window title shown while the mode is active.
    pub fn title(self) -> &'static str {
        match self {
            Self::Points => "GL_POINTS",
            Self::Lines => "GL_LINES",
            Self::LineStrip => "GL_LINE_STRIP",
            Self::LineLoop => "GL_LINE_LOOP",
            Self::Triangles => "GL_TRIANGLES",
            Self::TriangleFan => "GL_TRIANGLE_FAN",
            Self::TriangleStrip => "GL_TRIANGLE_STRIP",
        }
    }

    pub fn kind(self) -> PrimitiveKind {
        match self {
            Self::Points => PrimitiveKind::Points,
            Self::Lines => PrimitiveKind::Lines,
            Self::LineStrip => PrimitiveKind::LineStrip,
            Self::LineLoop => PrimitiveKind::LineLoop,
            Self::Triangles => PrimitiveKind::Triangles,
            Self::TriangleFan => PrimitiveKind::TriangleFan,
            Self::TriangleStrip => PrimitiveKind::TriangleStrip,
        }
    }

    /// Filled modes draw a red body with a black outline.
    pub fn is_filled(self) -> bool {
        self.kind().is_triangles()
    }
}
