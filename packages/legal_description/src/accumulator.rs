//! Confidence and issue accumulation for a single parse.
//!
//! A [`DescriptionBuilder`] is created per call and passed by `&mut` through
//! every stage. Stages can lower the confidence and append issues, never
//! raise confidence or remove an issue.

use parcel_trace_geometry::{MIN_POLYGON_POINTS, assemble};
use parcel_trace_legal_description_models::{
    Coordinate, DescriptionDialect, DescriptionPoint, DescriptionSegment, LotBlock,
    ParsedLegalDescription,
};

/// In-progress [`ParsedLegalDescription`] owned by one parse call.
#[derive(Debug)]
pub struct DescriptionBuilder {
    result: ParsedLegalDescription,
    polygon_attempted: bool,
}

impl DescriptionBuilder {
    /// Starts a result for `description` at the dialect's baseline
    /// confidence.
    #[must_use]
    pub fn new(description: &str, dialect: DescriptionDialect) -> Self {
        let mut result = ParsedLegalDescription::new(description);
        result.dialect = Some(dialect);
        result.confidence = dialect.baseline_confidence();
        Self {
            result,
            polygon_attempted: false,
        }
    }

    /// Current confidence.
    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.result.confidence
    }

    /// Issues recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[String] {
        &self.result.issues
    }

    /// Records an issue and lowers confidence by `amount`.
    pub fn penalize(&mut self, amount: f64, issue: impl Into<String>) {
        self.lower_to(self.result.confidence - amount.max(0.0));
        self.note(issue);
    }

    /// Records an issue and lowers confidence to at most `ceiling`.
    pub fn cap_confidence(&mut self, ceiling: f64, issue: impl Into<String>) {
        self.lower_to(ceiling);
        self.note(issue);
    }

    /// Records an issue and drops confidence to zero.
    pub fn fail(&mut self, issue: impl Into<String>) {
        self.lower_to(0.0);
        self.note(issue);
    }

    /// Records an issue without touching confidence.
    pub fn note(&mut self, issue: impl Into<String>) {
        let issue = issue.into();
        log::debug!("Legal description issue: {issue}");
        self.result.issues.push(issue);
    }

    fn lower_to(&mut self, value: f64) {
        let value = if value.is_nan() { 0.0 } else { value };
        self.result.confidence = self.result.confidence.min(value).clamp(0.0, 1.0);
    }

    /// Sets the township label (e.g. "12N").
    pub fn set_township(&mut self, township: String) {
        self.result.township = township;
    }

    /// Sets the range label (e.g. "5E").
    pub fn set_range(&mut self, range: String) {
        self.result.range = range;
    }

    /// Sets the section number.
    pub fn set_section(&mut self, section: String) {
        self.result.section = section;
    }

    /// Sets the lot/block references.
    pub fn set_lot_block(&mut self, lot_block: LotBlock) {
        self.result.lot_block = Some(lot_block);
    }

    /// Appends a point in traversal order.
    pub fn push_point(&mut self, point: DescriptionPoint) {
        self.result.points.push(point);
    }

    /// Appends a segment in traversal order.
    pub fn push_segment(&mut self, segment: DescriptionSegment) {
        self.result.segments.push(segment);
    }

    /// Points recorded so far.
    #[must_use]
    pub fn points(&self) -> &[DescriptionPoint] {
        &self.result.points
    }

    /// Segments recorded so far.
    #[must_use]
    pub fn segments(&self) -> &[DescriptionSegment] {
        &self.result.segments
    }

    /// Whether a polygon has been assembled.
    #[must_use]
    pub const fn has_polygon(&self) -> bool {
        self.result.polygon.is_some()
    }

    /// Whether [`Self::try_assemble_polygon`] has already run.
    #[must_use]
    pub const fn polygon_attempted(&self) -> bool {
        self.polygon_attempted
    }

    /// Whether enough points exist for a polygon.
    #[must_use]
    pub fn can_form_polygon(&self) -> bool {
        self.result.points.len() >= MIN_POLYGON_POINTS
    }

    /// Assembles a polygon from the recorded points.
    ///
    /// A failure is recorded as an `"Error creating polygon: ..."` issue
    /// and leaves confidence unchanged. Returns whether a polygon was set.
    pub fn try_assemble_polygon(&mut self) -> bool {
        self.polygon_attempted = true;
        let coordinates: Vec<Coordinate> =
            self.result.points.iter().map(|p| p.coordinate).collect();

        match assemble(&coordinates) {
            Ok(polygon) => {
                self.result.polygon = Some(polygon);
                true
            }
            Err(e) => {
                log::warn!("Failed to assemble polygon: {e}");
                self.note(format!("Error creating polygon: {e}"));
                false
            }
        }
    }

    /// Finishes the parse.
    #[must_use]
    pub fn finish(self) -> ParsedLegalDescription {
        self.result
    }
}
