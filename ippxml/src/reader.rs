use std::collections::HashSet;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use ippvm::{Arg, DataType, Instruction, Opcode};

use crate::error::{LoadError, Result};
use crate::text;

/// Parses an XML document into the program's instruction list, sorted by
/// the `order` attribute.
pub fn parse_program(source: &str) -> Result<Vec<Instruction>> {
    let mut reader = Reader::from_str(source);
    let mut instructions = parse_document(&mut reader)?;

    let mut seen = HashSet::new();
    for instruction in &instructions {
        if !seen.insert(instruction.order) {
            return Err(LoadError::DuplicateOrder(instruction.order));
        }
    }
    instructions.sort_by_key(|instruction| instruction.order);

    Ok(instructions)
}

fn parse_document(reader: &mut Reader<&[u8]>) -> Result<Vec<Instruction>> {
    loop {
        match reader.read_event()? {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Text(e) => {
                if !e.unescape()?.trim().is_empty() {
                    return Err(LoadError::structure(
                        "unexpected text before the program element",
                    ));
                }
            }
            Event::Start(e) => {
                check_root(&e)?;
                let instructions = parse_instructions(reader)?;
                finish(reader)?;
                return Ok(instructions);
            }
            Event::Empty(e) => {
                check_root(&e)?;
                finish(reader)?;
                return Ok(Vec::new());
            }
            Event::Eof => return Err(LoadError::MissingRoot),
            _ => {
                return Err(LoadError::structure(
                    "unexpected content before the program element",
                ))
            }
        }
    }
}

/// The root element must be `program` with `language="IPPCODE23"`
/// (case-insensitive); only `language`, `name` and `description`
/// attributes are allowed.
fn check_root(element: &BytesStart) -> Result<()> {
    if element.name().as_ref() != b"program" {
        return Err(LoadError::structure("root element must be \"program\""));
    }

    let mut language = None;
    for attr in element.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"language" => language = Some(value.into_owned()),
            b"name" | b"description" => {}
            key => {
                return Err(LoadError::structure(format!(
                    "unsupported program attribute \"{}\"",
                    String::from_utf8_lossy(key)
                )))
            }
        }
    }

    match language {
        Some(ref language) if language.eq_ignore_ascii_case("IPPCODE23") => Ok(()),
        Some(language) => Err(LoadError::structure(format!(
            "unsupported language \"{}\"",
            language
        ))),
        None => Err(LoadError::structure(
            "program element is missing the language attribute",
        )),
    }
}

fn parse_instructions(reader: &mut Reader<&[u8]>) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Comment(_) => {}
            Event::Text(e) => {
                if !e.unescape()?.trim().is_empty() {
                    return Err(LoadError::structure(
                        "unexpected text in the program element",
                    ));
                }
            }
            Event::Start(e) => {
                let (order, opcode) = instruction_attributes(&e)?;
                let args = parse_args(reader)?;
                instructions.push(Instruction::new(order, opcode, args));
            }
            Event::Empty(e) => {
                let (order, opcode) = instruction_attributes(&e)?;
                instructions.push(Instruction::new(order, opcode, Vec::new()));
            }
            Event::End(_) => return Ok(instructions),
            Event::Eof => return Err(LoadError::Truncated),
            _ => {
                return Err(LoadError::structure(
                    "unexpected content in the program element",
                ))
            }
        }
    }
}

fn instruction_attributes(element: &BytesStart) -> Result<(u32, Opcode)> {
    if element.name().as_ref() != b"instruction" {
        return Err(LoadError::structure(format!(
            "unexpected element \"{}\" in program",
            String::from_utf8_lossy(element.name().as_ref())
        )));
    }

    let mut order = None;
    let mut opcode = None;
    for attr in element.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"order" => order = Some(text::parse_order(&value)?),
            b"opcode" => {
                let name = value.trim().to_uppercase();
                opcode = Some(Opcode::from_str(&name).map_err(LoadError::UnknownOpcode)?);
            }
            key => {
                return Err(LoadError::structure(format!(
                    "unsupported instruction attribute \"{}\"",
                    String::from_utf8_lossy(key)
                )))
            }
        }
    }

    match (order, opcode) {
        (Some(order), Some(opcode)) => Ok((order, opcode)),
        _ => Err(LoadError::structure(
            "instruction element requires order and opcode attributes",
        )),
    }
}

fn parse_args(reader: &mut Reader<&[u8]>) -> Result<Vec<Arg>> {
    let mut slots: [Option<Arg>; 3] = [None, None, None];

    loop {
        match reader.read_event()? {
            Event::Comment(_) => {}
            Event::Text(e) => {
                if !e.unescape()?.trim().is_empty() {
                    return Err(LoadError::structure(
                        "unexpected text in an instruction element",
                    ));
                }
            }
            Event::Start(e) => {
                let (index, ty) = arg_attributes(&e)?;
                let body = read_body(reader)?;
                store_arg(&mut slots, index, make_arg(&ty, body.trim())?)?;
            }
            Event::Empty(e) => {
                let (index, ty) = arg_attributes(&e)?;
                store_arg(&mut slots, index, make_arg(&ty, "")?)?;
            }
            Event::End(_) => break,
            Event::Eof => return Err(LoadError::Truncated),
            _ => {
                return Err(LoadError::structure(
                    "unexpected content in an instruction element",
                ))
            }
        }
    }

    // args must form a gap-free arg1..argN prefix
    let mut args = Vec::new();
    let mut ended = false;
    for slot in slots.iter_mut() {
        match slot.take() {
            Some(arg) if !ended => args.push(arg),
            Some(_) => {
                return Err(LoadError::structure(
                    "argument indices must be contiguous from arg1",
                ))
            }
            None => ended = true,
        }
    }
    Ok(args)
}

fn store_arg(slots: &mut [Option<Arg>; 3], index: usize, arg: Arg) -> Result<()> {
    if slots[index].is_some() {
        return Err(LoadError::structure(format!(
            "argument arg{} appears twice",
            index + 1
        )));
    }
    slots[index] = Some(arg);
    Ok(())
}

fn arg_attributes(element: &BytesStart) -> Result<(usize, String)> {
    let index = match element.name().as_ref() {
        b"arg1" => 0,
        b"arg2" => 1,
        b"arg3" => 2,
        name => {
            return Err(LoadError::structure(format!(
                "unexpected element \"{}\" in instruction",
                String::from_utf8_lossy(name)
            )))
        }
    };

    let mut ty = None;
    for attr in element.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"type" => ty = Some(attr.unescape_value()?.into_owned()),
            key => {
                return Err(LoadError::structure(format!(
                    "unsupported argument attribute \"{}\"",
                    String::from_utf8_lossy(key)
                )))
            }
        }
    }

    let ty = ty.ok_or_else(|| {
        LoadError::structure("argument element is missing its type attribute")
    })?;
    Ok((index, ty))
}

/// Collects the textual body of an argument element up to its end tag.
fn read_body(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut body = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => body.push_str(&e.unescape()?),
            Event::CData(e) => {
                let chunk = std::str::from_utf8(&e)
                    .map_err(|_| LoadError::structure("argument body is not valid UTF-8"))?;
                body.push_str(chunk);
            }
            Event::Comment(_) => {}
            Event::End(_) => return Ok(body),
            Event::Eof => return Err(LoadError::Truncated),
            _ => {
                return Err(LoadError::structure(
                    "argument elements cannot contain child elements",
                ))
            }
        }
    }
}

fn make_arg(ty: &str, body: &str) -> Result<Arg> {
    match ty {
        "var" => Ok(Arg::Var(text::parse_variable(body)?)),
        "label" => {
            if body.is_empty() {
                return Err(LoadError::structure("label name cannot be empty"));
            }
            Ok(Arg::Label(body.to_string()))
        }
        "type" => DataType::from_str(body)
            .map(Arg::Type)
            .map_err(|err| LoadError::structure(format!("unknown type name: {}", err))),
        ty => match text::parse_literal(ty, body)? {
            Some(value) => Ok(Arg::Literal(value)),
            None => Err(LoadError::structure(format!(
                "unknown argument type \"{}\"",
                ty
            ))),
        },
    }
}

/// Only insignificant content may follow the program element.
fn finish(reader: &mut Reader<&[u8]>) -> Result<()> {
    loop {
        match reader.read_event()? {
            Event::Comment(_) | Event::PI(_) => {}
            Event::Text(e) => {
                if !e.unescape()?.trim().is_empty() {
                    return Err(LoadError::structure(
                        "unexpected text after the program element",
                    ));
                }
            }
            Event::Eof => return Ok(()),
            _ => {
                return Err(LoadError::structure(
                    "unexpected content after the program element",
                ))
            }
        }
    }
}
