//! Reading a shape catalog and its regions from text.
//!
//! ```text
//! 0:
//! ###
//! ##.
//!
//! 4x4: 0 2
//! ```
//!
//! A shape block is a `<id>:` header followed by rows of `#` (filled) and `.`
//! (empty). A region line is `<width>x<height>:` followed by one count per
//! shape id, starting at id 0; missing trailing counts are 0. Blank lines end
//! a shape block and anything else is skipped with a warning.

use crate::{
    error::{ParseError, ValidationError},
    region::{Catalog, Region},
    shape::Shape,
};

/// Shape block being collected.
struct PendingShape<'a> {
    id: usize,
    rows: Vec<&'a str>,
}

impl PendingShape<'_> {
    fn finish(self) -> Result<Shape, ValidationError> {
        Shape::from_rows(self.id, self.rows)
    }
}

/// Parse a catalog followed by its regions.
///
/// Every region is checked against the catalog, so a non-zero count for an
/// undeclared shape fails with [`ValidationError::UnknownShape`].
pub fn parse_catalog(input: &str) -> Result<(Catalog, Vec<Region>), ParseError> {
    let mut shapes = Vec::new();
    let mut regions = Vec::new();
    let mut pending: Option<PendingShape> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            if let Some(shape) = pending.take() {
                shapes.push(shape.finish()?);
            }
            continue;
        }

        if let Some((prefix, rest)) = line.split_once(':') {
            if let Some(shape) = pending.take() {
                shapes.push(shape.finish()?);
            }

            if prefix.contains('x') {
                regions.push(parse_region(line_number, line, prefix, rest)?);
            } else if rest.trim().is_empty() {
                let id = prefix.trim().parse().map_err(|_| ParseError::ShapeHeader {
                    line: line_number,
                    text: line.to_string(),
                })?;
                pending = Some(PendingShape { id, rows: Vec::new() });
            } else {
                log::warn!("Skipping line {}: '{}'", line_number, line);
            }
            continue;
        }

        match pending.as_mut() {
            Some(shape) if line.starts_with(|c: char| matches!(c, '#' | '.')) => {
                if let Some((column, found)) = line
                    .chars()
                    .enumerate()
                    .find(|&(_, c)| !matches!(c, '#' | '.'))
                {
                    return Err(ParseError::ShapeRow {
                        line: line_number,
                        column: column + 1,
                        found,
                    });
                }
                shape.rows.push(line);
            }
            _ => log::warn!("Skipping line {}: '{}'", line_number, line),
        }
    }

    if let Some(shape) = pending.take() {
        shapes.push(shape.finish()?);
    }

    let catalog = Catalog::new(shapes)?;
    for region in &regions {
        catalog.validate_region(region)?;
    }

    log::debug!(
        "Parsed {} shapes and {} regions.",
        catalog.len(),
        regions.len()
    );

    Ok((catalog, regions))
}

fn parse_region(
    line_number: usize,
    line: &str,
    size: &str,
    counts: &str,
) -> Result<Region, ParseError> {
    let Some((width, height)) = size.trim().split_once('x') else {
        return Err(ParseError::Region {
            line: line_number,
            text: line.to_string(),
        });
    };

    let number = |field: &str| {
        field.parse::<usize>().map_err(|source| ParseError::Number {
            line: line_number,
            source,
        })
    };

    let width = number(width)?;
    let height = number(height)?;
    let counts = counts
        .split_whitespace()
        .enumerate()
        .map(|(id, count)| number(count).map(|count| (id, count)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Region::new(width, height, counts)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
0:
###
##.
##.

1:
###
##.
.##

4:
###
#..
###

4x4: 0 0 0 0 2
12x5: 1 0 0 0 2
";

    #[test]
    fn parse_shapes_and_regions() {
        let (catalog, regions) = parse_catalog(SAMPLE).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(0).unwrap().area(), 7);
        assert_eq!(catalog.get(4).unwrap().area(), 7);
        assert!(catalog.get(2).is_none());

        assert_eq!(regions.len(), 2);
        assert_eq!((regions[0].width(), regions[0].height()), (4, 4));
        assert_eq!(regions[0].counts().collect::<Vec<_>>(), vec![(4, 2)]);
        assert_eq!(regions[1].counts().collect::<Vec<_>>(), vec![(0, 1), (4, 2)]);
    }

    #[test]
    fn shape_row_maps_to_cells() {
        let (catalog, _) = parse_catalog("3:\n.#\n##\n").unwrap();
        let shape = catalog.get(3).unwrap();

        assert_eq!(shape.footprint().cells(), &[(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn header_ends_previous_block() {
        let (catalog, _) = parse_catalog("0:\n#\n1:\n##\n").unwrap();

        assert_eq!(catalog.get(0).unwrap().area(), 1);
        assert_eq!(catalog.get(1).unwrap().area(), 2);
    }

    #[test]
    fn stray_lines_are_skipped() {
        let (catalog, regions) = parse_catalog("hello\n0:\n##\n\n##\n2x1: 1\n").unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn bad_header_is_rejected() {
        assert!(matches!(
            parse_catalog("a:\n#\n"),
            Err(ParseError::ShapeHeader { line: 1, .. })
        ));
    }

    #[test]
    fn bad_shape_row_is_rejected() {
        assert!(matches!(
            parse_catalog("0:\n#.\n#?\n"),
            Err(ParseError::ShapeRow {
                line: 3,
                column: 2,
                found: '?'
            })
        ));
    }

    #[test]
    fn bad_region_is_rejected() {
        assert!(matches!(
            parse_catalog("0:\n#\n\n4x: 1\n"),
            Err(ParseError::Number { line: 4, .. })
        ));
        assert!(matches!(
            parse_catalog("0:\n#\n\n4x4: 1 z\n"),
            Err(ParseError::Number { line: 4, .. })
        ));
        assert!(matches!(
            parse_catalog("0:\n#\n\n0x4: 1\n"),
            Err(ParseError::Validation(ValidationError::ZeroWidth))
        ));
    }

    #[test]
    fn empty_shape_is_rejected() {
        assert!(matches!(
            parse_catalog("0:\n...\n"),
            Err(ParseError::Validation(ValidationError::EmptyShape(0)))
        ));
    }

    #[test]
    fn duplicate_shape_is_rejected() {
        assert!(matches!(
            parse_catalog("0:\n#\n\n0:\n##\n"),
            Err(ParseError::Validation(ValidationError::DuplicateShape(0)))
        ));
    }

    #[test]
    fn count_for_missing_shape() {
        // a zero count for an undeclared shape is fine
        assert!(parse_catalog("0:\n#\n\n2x2: 4 0\n").is_ok());
        assert!(matches!(
            parse_catalog("0:\n#\n\n2x2: 3 1\n"),
            Err(ParseError::Validation(ValidationError::UnknownShape(1)))
        ));
    }
}
