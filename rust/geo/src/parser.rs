// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record parsers for GEO lines using nom.
//!
//! GEO values are plain decimal numbers separated by single spaces. Every
//! parser here works on one trimmed line.

use nom::{
    character::complete::{char, digit1, one_of, space0, space1},
    combinator::{map_res, opt, recognize},
    sequence::{pair, preceded, separated_pair, tuple},
    IResult,
};

/// Parse decimal number: 3, -3.25, 1.5E-10, 0.
pub fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            digit1,
            opt(pair(char('.'), opt(digit1))),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| fast_float::parse::<f64, _>(s),
    )(input)
}

/// Parse 1-based vertex reference
fn vertex_ref(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// Parse coordinate triple `x y z`, returning `(x, y)`.
///
/// The Z value is optional and ignored.
pub fn coordinates(input: &str) -> IResult<&str, (f64, f64)> {
    let (rest, xy) = separated_pair(number, space1, number)(input)?;
    let (rest, _) = opt(preceded(space1, number))(rest)?;
    Ok((rest, xy))
}

/// Parse a vertex pair `i j`
pub fn vertex_pair(input: &str) -> IResult<&str, (usize, usize)> {
    separated_pair(vertex_ref, space1, vertex_ref)(input)
}

/// Parse the leading number of a line, ignoring what follows.
pub fn leading_number(input: &str) -> IResult<&str, f64> {
    preceded(space0, number)(input)
}
