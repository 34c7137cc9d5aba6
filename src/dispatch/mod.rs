//! Member dispatch (spec section 4.2): walks a JSON object or array and feeds each member's/
//!  element's value to caller-supplied closures, tolerant of producer order. This is the engine
//!  `JsonContract` impls (hand-written, or generated via the `json_member!` macro) are built on.

use crate::contract::{NullBehavior, ParseOptions};
use crate::cursor::{Cursor, Policy};
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::extract::decode_string;

fn err<P: Policy>(cursor: &Cursor<P>, kind: ParseErrorKind, reason: &'static str) -> ParseError {
    if P::CHECKED {
        ParseError::new(kind, reason, cursor.location())
    }
    else {
        ParseError::without_location(kind, reason)
    }
}

/// One class member's dispatch behavior: `handler` is invoked with `Some(cursor)`, the cursor
///  positioned at the start of the member's JSON value (including an explicit `null`, which a
///  nullable member's closure must detect itself), when the member is matched; it is invoked once
///  with `None`, after the whole object has been scanned, if the member was never matched - unless
///  `null_behavior` is `NullBehavior::MustExist`, in which case an unmatched slot fails the whole
///  dispatch instead of calling `handler` at all. A single closure (rather than one for each case)
///  is what lets macro-generated slots accumulate into one local variable without the two halves
///  fighting over a unique borrow of it.
pub struct MemberSlot<'s, 'c, P: Policy> {
    pub name: &'static str,
    pub resolved: bool,
    null_behavior: NullBehavior,
    handler: &'s mut dyn FnMut(Option<&mut Cursor<'c, P>>) -> ParseResult<()>,
}
impl<'s, 'c, P: Policy> MemberSlot<'s, 'c, P> {
    pub fn new(name: &'static str, handler: &'s mut dyn FnMut(Option<&mut Cursor<'c, P>>) -> ParseResult<()>) -> Self {
        MemberSlot { name, resolved: false, null_behavior: NullBehavior::NullVisible, handler }
    }

    /// Overrides how omission of this member is treated once the whole object has been scanned
    ///  (spec section 6) - `NullBehavior::MustExist` is enforced by `dispatch_class_members`
    ///  itself rather than by the slot's own `handler`, since a missing-member `handler` call has
    ///  no way to signal "fail with `MissingMember`" other than returning `Err`, which this makes
    ///  automatic.
    pub fn with_null_behavior(mut self, null_behavior: NullBehavior) -> Self {
        self.null_behavior = null_behavior;
        self
    }
}

fn scan_member_name<'c, P: Policy>(cursor: &mut Cursor<'c, P>) -> ParseResult<alloc::string::String> {
    if cursor.peek()? != b'"' {
        return Err(err(cursor, ParseErrorKind::ExpectedMemberName, "expected a member name"));
    }
    let name = decode_string(cursor)?;
    Ok(alloc::string::ToString::to_string(name.as_str()))
}

fn expect_colon<P: Policy>(cursor: &mut Cursor<P>) -> ParseResult<()> {
    cursor.trim_left()?;
    if cursor.peek()? != b':' {
        return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected ':'"));
    }
    cursor.advance(1)?;
    cursor.trim_left()?;
    Ok(())
}

/// Parses a JSON object (`{ ... }`) at the cursor, dispatching each member by name to whichever
///  `slots` entry declares it, regardless of JSON producer order (spec section 4.2's prescribed
///  default, testable property 3). An unmatched JSON member is skipped (and, if
///  `options.report_unknown_members`, reported through `on_unknown_member`). After all JSON
///  members are consumed, any slot that was never matched runs its `on_missing` closure.
///
///  `options.strict_order` switches to the single-pass fast path from spec section 4.2: each
///  JSON member is matched only against `slots` from the current declared-order position onward,
///  which is cheaper but requires a producer that emits members in contract-declared order
///  (interleaved extras are still tolerated).
pub fn dispatch_class_members<'c, P: Policy>(
    cursor: &mut Cursor<'c, P>,
    slots: &mut [MemberSlot<'_, 'c, P>],
    options: &ParseOptions,
    mut on_unknown_member: impl FnMut(&str),
) -> ParseResult<()> {
    cursor.trim_left()?;
    if cursor.peek()? != b'{' {
        return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected '{'"));
    }
    cursor.advance(1)?;
    cursor.trim_left()?;
    let mut declared_from = 0usize;
    if cursor.peek()? != b'}' {
        loop {
            cursor.trim_left()?;
            let name = scan_member_name(cursor)?;
            expect_colon(cursor)?;

            let matched = if options.strict_order {
                slots[declared_from..].iter().position(|s| !s.resolved && s.name == name).map(|p| declared_from + p)
            }
            else {
                slots.iter().position(|s| !s.resolved && s.name == name)
            };

            match matched {
                Some(idx) => {
                    (slots[idx].handler)(Some(cursor))?;
                    slots[idx].resolved = true;
                    if options.strict_order {
                        declared_from = idx + 1;
                    }
                }
                None => {
                    if options.report_unknown_members {
                        on_unknown_member(&name);
                    }
                    cursor.skip_value()?;
                }
            }

            cursor.trim_left()?;
            match cursor.peek()? {
                b',' => {
                    cursor.advance(1)?;
                }
                b'}' => break,
                _ => return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected ',' or '}'")),
            }
        }
    }
    cursor.advance(1)?; // closing '}'

    for slot in slots.iter_mut() {
        if !slot.resolved {
            if slot.null_behavior == NullBehavior::MustExist {
                return Err(err(cursor, ParseErrorKind::MissingMember, "member must be present even if null"));
            }
            (slot.handler)(None)?;
        }
    }
    Ok(())
}

/// Parses a fixed-length JSON array (`Tuple`/`OrderedTuple` mappings, spec section 4.2): elements
///  are positional, strict in order, and the array must close with `]` right after the last one.
pub fn dispatch_tuple_elements<'c, P: Policy>(
    cursor: &mut Cursor<'c, P>,
    elements: &mut [&mut dyn FnMut(&mut Cursor<'c, P>) -> ParseResult<()>],
) -> ParseResult<()> {
    cursor.trim_left()?;
    if cursor.peek()? != b'[' {
        return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected '['"));
    }
    cursor.advance(1)?;
    for (i, element) in elements.iter_mut().enumerate() {
        cursor.trim_left()?;
        if i > 0 {
            if cursor.peek()? != b',' {
                return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected ',' between tuple elements"));
            }
            cursor.advance(1)?;
            cursor.trim_left()?;
        }
        (element)(cursor)?;
    }
    cursor.trim_left()?;
    if cursor.peek()? != b']' {
        return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected ']'"));
    }
    cursor.advance(1)?;
    Ok(())
}

/// Parses a homogeneous JSON array (`Array`/`SizedArray` mappings), invoking `push` once per
///  element with the cursor positioned at that element's value.
pub fn dispatch_array<'c, P: Policy>(
    cursor: &mut Cursor<'c, P>,
    mut push: impl FnMut(&mut Cursor<'c, P>) -> ParseResult<()>,
) -> ParseResult<()> {
    cursor.trim_left()?;
    if cursor.peek()? != b'[' {
        return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected '['"));
    }
    cursor.advance(1)?;
    cursor.trim_left()?;
    if cursor.peek()? == b']' {
        cursor.advance(1)?;
        return Ok(());
    }
    loop {
        cursor.trim_left()?;
        push(cursor)?;
        cursor.trim_left()?;
        match cursor.peek()? {
            b',' => {
                cursor.advance(1)?;
            }
            b']' => break,
            _ => return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected ',' or ']'")),
        }
    }
    cursor.advance(1)?;
    Ok(())
}

/// Parses a `KeyValue`-mapped JSON object (an object treated as a map rather than a fixed member
///  list), invoking `insert` once per member with its decoded key and the cursor positioned at
///  its value.
pub fn dispatch_key_value_object<'c, P: Policy>(
    cursor: &mut Cursor<'c, P>,
    mut insert: impl FnMut(alloc::string::String, &mut Cursor<'c, P>) -> ParseResult<()>,
) -> ParseResult<()> {
    cursor.trim_left()?;
    if cursor.peek()? != b'{' {
        return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected '{'"));
    }
    cursor.advance(1)?;
    cursor.trim_left()?;
    if cursor.peek()? == b'}' {
        cursor.advance(1)?;
        return Ok(());
    }
    loop {
        cursor.trim_left()?;
        let key = scan_member_name(cursor)?;
        expect_colon(cursor)?;
        insert(key, cursor)?;
        cursor.trim_left()?;
        match cursor.peek()? {
            b',' => {
                cursor.advance(1)?;
            }
            b'}' => break,
            _ => return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected ',' or '}'")),
        }
    }
    cursor.advance(1)?;
    Ok(())
}

/// Parses a `KeyValueArray`-mapped JSON array (`[{"key": ..., "value": ...}, ...]`), invoking
///  `insert` once per array element.
pub fn dispatch_key_value_array<'c, P: Policy>(
    cursor: &mut Cursor<'c, P>,
    key_member_name: &'static str,
    value_member_name: &'static str,
    mut parse_key: impl FnMut(&mut Cursor<'c, P>) -> ParseResult<alloc::string::String>,
    mut insert: impl FnMut(alloc::string::String, &mut Cursor<'c, P>) -> ParseResult<()>,
) -> ParseResult<()> {
    dispatch_array(cursor, |cursor| {
        cursor.trim_left()?;
        if cursor.peek()? != b'{' {
            return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected '{' for key/value element"));
        }
        cursor.advance(1)?;
        cursor.trim_left()?;
        let mut key: Option<alloc::string::String> = None;
        let mut value_cursor: Option<Cursor<'c, P>> = None;
        if cursor.peek()? != b'}' {
            loop {
                cursor.trim_left()?;
                let name = scan_member_name(cursor)?;
                expect_colon(cursor)?;
                if name == key_member_name {
                    key = Some(parse_key(cursor)?);
                }
                else if name == value_member_name {
                    value_cursor = Some(*cursor);
                    cursor.skip_value()?;
                }
                else {
                    cursor.skip_value()?;
                }
                cursor.trim_left()?;
                match cursor.peek()? {
                    b',' => {
                        cursor.advance(1)?;
                    }
                    b'}' => break,
                    _ => return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected ',' or '}'")),
                }
            }
        }
        cursor.advance(1)?;
        let key = key.ok_or_else(|| err(cursor, ParseErrorKind::MissingMember, "missing key in key/value element"))?;
        let mut value_cursor = value_cursor
            .ok_or_else(|| err(cursor, ParseErrorKind::MissingMember, "missing value in key/value element"))?;
        insert(key, &mut value_cursor)
    })
}

/// Selects a variant by the syntactic JSON base type of its value (spec section 4.2): inspects
///  the first non-whitespace byte and dispatches without looking at any sibling member.
pub fn dispatch_variant_by_base_type<'c, P: Policy, R>(
    cursor: &mut Cursor<'c, P>,
    mut on_number: impl FnMut(&mut Cursor<'c, P>) -> ParseResult<R>,
    mut on_string: impl FnMut(&mut Cursor<'c, P>) -> ParseResult<R>,
    mut on_bool: impl FnMut(&mut Cursor<'c, P>) -> ParseResult<R>,
    mut on_object: impl FnMut(&mut Cursor<'c, P>) -> ParseResult<R>,
    mut on_array: impl FnMut(&mut Cursor<'c, P>) -> ParseResult<R>,
) -> ParseResult<R> {
    cursor.trim_left()?;
    match cursor.peek()? {
        b'{' => on_object(cursor),
        b'[' => on_array(cursor),
        b'"' => on_string(cursor),
        b'-' | b'0'..=b'9' => on_number(cursor),
        b't' | b'f' => on_bool(cursor),
        _ => Err(err(cursor, ParseErrorKind::VariantDiscriminatorNotMatched, "value matches no variant base type")),
    }
}

/// Selects a variant by a tag member's value (spec section 4.2). Requires a true two-pass scan
///  of the enclosing object, since the payload member's mapping is only known once the tag has
///  been read, and the tag may follow the payload in JSON text order: the first pass locates and
///  parses only the tag; the second pass, over the same bytes, parses only the payload once its
///  mapping is known.
pub fn dispatch_variant_tagged<'c, P: Policy, Tag: Copy>(
    cursor: &mut Cursor<'c, P>,
    tag_member_name: &'static str,
    payload_member_name: &'static str,
    mut scan_tag: impl FnMut(&mut Cursor<'c, P>) -> ParseResult<Tag>,
    mut parse_payload_for_tag: impl FnMut(Tag, &mut Cursor<'c, P>) -> ParseResult<()>,
) -> ParseResult<()> {
    let snapshot = *cursor;

    let mut tag: Option<Tag> = None;
    {
        let mut on_tag = |c: Option<&mut Cursor<'c, P>>| -> ParseResult<()> {
            match c {
                Some(c) => {
                    tag = Some(scan_tag(c)?);
                    Ok(())
                }
                None => Err(ParseError::without_location(ParseErrorKind::MissingMember, "variant tag member is missing")),
            }
        };
        let mut on_payload_skip = |c: Option<&mut Cursor<'c, P>>| -> ParseResult<()> {
            match c {
                Some(c) => c.skip_value(),
                None => Ok(()),
            }
        };
        let mut slots = [
            MemberSlot::new(tag_member_name, &mut on_tag),
            MemberSlot::new(payload_member_name, &mut on_payload_skip),
        ];
        let mut scan_cursor = snapshot;
        dispatch_class_members(&mut scan_cursor, &mut slots, &ParseOptions::default(), |_| {})?;
    }
    let tag = tag.expect("handler(None) would have failed otherwise");

    let mut replay = snapshot;
    {
        let mut on_tag_skip = |c: Option<&mut Cursor<'c, P>>| -> ParseResult<()> {
            match c {
                Some(c) => c.skip_value(),
                None => Ok(()),
            }
        };
        let mut on_payload = |c: Option<&mut Cursor<'c, P>>| -> ParseResult<()> {
            match c {
                Some(c) => parse_payload_for_tag(tag, c),
                None => Err(ParseError::without_location(ParseErrorKind::MissingMember, "variant payload member is missing")),
            }
        };
        let mut slots = [
            MemberSlot::new(tag_member_name, &mut on_tag_skip),
            MemberSlot::new(payload_member_name, &mut on_payload),
        ];
        dispatch_class_members(&mut replay, &mut slots, &ParseOptions::default(), |_| {})?;
    }
    *cursor = replay;
    Ok(())
}
