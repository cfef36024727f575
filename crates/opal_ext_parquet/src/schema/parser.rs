//! Recursive-descent parse over the flattened schema-element sequence.
//!
//! The footer flattens the schema tree pre-order, so the parser walks a
//! single monotone cursor over the element slice: each `parse_node` call
//! consumes the element at the cursor plus its whole subtree and leaves the
//! cursor at the first unconsumed sibling. Level metadata is threaded down
//! as an explicit [`LevelInfo`] value rather than stored on shared state.

use opal_core::arrays::datatype::DataType;
use opal_core::arrays::field::Field;
use opal_error::{DbError, DbErrorKind, Result};
use tracing::warn;

use crate::basic::{ConvertedType, LogicalType, Repetition};
use crate::format::SchemaElement;
use crate::schema::convert::resolve_leaf_type;
use crate::schema::types::{ColumnDescriptor, FieldSchema};

pub(crate) fn is_group_node(element: &SchemaElement) -> bool {
    element.num_children > 0
}

fn is_list_node(element: &SchemaElement) -> bool {
    matches!(element.converted_type, Some(ConvertedType::LIST))
        || matches!(element.logical_type, Some(LogicalType::List))
}

fn is_map_node(element: &SchemaElement) -> bool {
    matches!(
        element.converted_type,
        Some(ConvertedType::MAP | ConvertedType::MAP_KEY_VALUE)
    ) || matches!(element.logical_type, Some(LogicalType::Map))
}

fn is_repeated_node(element: &SchemaElement) -> bool {
    element.repetition == Some(Repetition::REPEATED)
}

fn is_required_node(element: &SchemaElement) -> bool {
    element.repetition == Some(Repetition::REQUIRED)
}

fn is_optional_node(element: &SchemaElement) -> bool {
    element.repetition == Some(Repetition::OPTIONAL)
}

fn num_children_node(element: &SchemaElement) -> usize {
    element.num_children.max(0) as usize
}

/// Whether a repeated middle level of a three-level list directly holds the
/// struct fields, as opposed to wrapping a single nested field.
///
/// Old writers name the synthetic wrapper of a list-of-struct either
/// exactly "array" or with a "_tuple" suffix; anything else with a single
/// child is an ordinary middle level to unwrap.
fn is_struct_list_node(element: &SchemaElement) -> bool {
    element.name == "array" || element.name.ends_with("_tuple")
}

/// Shape of a schema node, computed once and dispatched on exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeShape {
    /// Group annotated MAP or MAP_KEY_VALUE.
    Map,
    /// Group annotated LIST.
    List,
    /// Repeated group without a list/map annotation.
    RepeatedGroup,
    /// Any other group.
    Group,
    /// `repeated <primitive> <name>`.
    RepeatedPrimitive,
    /// Optional or required primitive.
    Primitive,
}

pub(crate) fn classify(element: &SchemaElement) -> NodeShape {
    if is_group_node(element) {
        if is_map_node(element) {
            NodeShape::Map
        } else if is_list_node(element) {
            NodeShape::List
        } else if is_repeated_node(element) {
            NodeShape::RepeatedGroup
        } else {
            NodeShape::Group
        }
    } else if is_repeated_node(element) {
        NodeShape::RepeatedPrimitive
    } else {
        NodeShape::Primitive
    }
}

/// Level metadata a node inherits from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LevelInfo {
    /// Count of REPEATED ancestors.
    pub rep_level: i16,
    /// Count of OPTIONAL-or-REPEATED ancestors.
    pub def_level: i16,
    /// Definition level of the nearest REPEATED ancestor, 0 if none.
    pub repeated_parent_def_level: i16,
}

impl LevelInfo {
    pub const ROOT: LevelInfo = LevelInfo {
        rep_level: 0,
        def_level: 0,
        repeated_parent_def_level: 0,
    };
}

/// Parses a prefix of the element sequence per top-level field.
///
/// One parser instance is scoped to a single resolve call; the cursor only
/// moves forward and is never shared.
pub(crate) struct SchemaParser<'a> {
    elements: &'a [SchemaElement],
    pos: usize,
    leaves: Vec<ColumnDescriptor>,
}

impl<'a> SchemaParser<'a> {
    /// Create a parser positioned after the root element.
    pub fn new(elements: &'a [SchemaElement]) -> Self {
        SchemaParser {
            elements,
            pos: 1,
            leaves: Vec::new(),
        }
    }

    /// Check that the whole sequence was consumed and hand back the leaf
    /// columns in on-disk chunk order.
    pub fn finish(self) -> Result<Vec<ColumnDescriptor>> {
        if self.pos != self.elements.len() {
            return Err(DbError::new(
                DbErrorKind::SchemaLengthMismatch,
                format!(
                    "{} schema elements remain unconsumed after resolving all fields",
                    self.elements.len() - self.pos
                ),
            ));
        }
        Ok(self.leaves)
    }

    fn peek(&self) -> Result<&'a SchemaElement> {
        self.elements.get(self.pos).ok_or_else(|| {
            DbError::new(
                DbErrorKind::SchemaCursorOutOfBounds,
                format!(
                    "schema parser ran past the element sequence at position {}",
                    self.pos
                ),
            )
        })
    }

    /// Parse the node at the cursor and its whole subtree.
    pub fn parse_node(&mut self, levels: LevelInfo) -> Result<FieldSchema> {
        let element = self.peek()?;
        match classify(element) {
            NodeShape::Map => self.parse_map(levels),
            NodeShape::List => self.parse_list(levels),
            NodeShape::RepeatedGroup => self.parse_repeated_group(levels),
            NodeShape::Group => self.parse_struct(levels),
            NodeShape::RepeatedPrimitive => self.parse_repeated_primitive(levels),
            NodeShape::Primitive => self.parse_primitive(levels),
        }
    }

    /// Leaf column. Appends to the physical column list; does not advance
    /// the cursor (callers own consumption of the element).
    fn build_physical(
        &mut self,
        element: &SchemaElement,
        nullable: bool,
        levels: LevelInfo,
    ) -> Result<FieldSchema> {
        let resolved = resolve_leaf_type(element, nullable)?;
        let physical_type = element.physical_type.ok_or_else(|| {
            DbError::new(
                DbErrorKind::UnsupportedSchemaType,
                format!("element '{}' has no physical type", element.name),
            )
        })?;
        let column_index = self.leaves.len();
        self.leaves.push(ColumnDescriptor {
            column_index,
            name: element.name.clone(),
            physical_type,
            max_rep_level: levels.rep_level,
            max_def_level: levels.def_level,
            repeated_parent_def_level: levels.repeated_parent_def_level,
            datatype: resolved.datatype.clone(),
            element: element.clone(),
        });
        Ok(FieldSchema {
            name: element.name.clone(),
            datatype: resolved.datatype,
            physical_type: Some(physical_type),
            repetition_level: levels.rep_level,
            definition_level: levels.def_level,
            repeated_parent_def_level: levels.repeated_parent_def_level,
            field_id: element.field_id.unwrap_or(-1),
            physical_column_index: Some(column_index),
            coerced: resolved.coerced,
            children: Vec::new(),
        })
    }

    fn parse_primitive(&mut self, levels: LevelInfo) -> Result<FieldSchema> {
        let element = self.peek()?;
        let is_optional = is_optional_node(element);
        let node_levels = LevelInfo {
            rep_level: levels.rep_level,
            def_level: levels.def_level + i16::from(is_optional),
            repeated_parent_def_level: levels.repeated_parent_def_level,
        };
        let field = self.build_physical(element, is_optional, node_levels)?;
        self.pos += 1;
        Ok(field)
    }

    /// `repeated <primitive> <name>`: synthesize a non-null array of the
    /// element.
    fn parse_repeated_primitive(&mut self, levels: LevelInfo) -> Result<FieldSchema> {
        let element = self.peek()?;
        let rep_level = levels.rep_level + 1;
        let def_level = levels.def_level + 1;
        let child_levels = LevelInfo {
            rep_level,
            def_level,
            repeated_parent_def_level: def_level,
        };
        let child = self.build_physical(element, false, child_levels)?;
        self.pos += 1;
        let datatype = DataType::list(child.datatype.clone().make_nullable());
        Ok(FieldSchema {
            name: element.name.clone(),
            datatype,
            physical_type: None,
            repetition_level: rep_level,
            definition_level: def_level,
            repeated_parent_def_level: levels.repeated_parent_def_level,
            field_id: element.field_id.unwrap_or(-1),
            physical_column_index: None,
            coerced: false,
            children: vec![child],
        })
    }

    /// Group without annotation: plain struct.
    fn parse_struct(&mut self, levels: LevelInfo) -> Result<FieldSchema> {
        let element = self.peek()?;
        let is_optional = is_optional_node(element);
        let def_level = levels.def_level + i16::from(is_optional);
        let child_levels = LevelInfo {
            rep_level: levels.rep_level,
            def_level,
            repeated_parent_def_level: levels.repeated_parent_def_level,
        };
        let num_children = num_children_node(element);
        self.pos += 1;
        let mut children = Vec::with_capacity(num_children);
        for _ in 0..num_children {
            children.push(self.parse_node(child_levels)?);
        }
        let fields = children
            .iter()
            .map(|child| Field::new(child.name.clone(), child.datatype.clone().make_nullable()))
            .collect();
        let mut datatype = DataType::struct_type(fields);
        if is_optional {
            datatype = datatype.make_nullable();
        }
        Ok(FieldSchema {
            name: element.name.clone(),
            datatype,
            physical_type: None,
            repetition_level: levels.rep_level,
            definition_level: def_level,
            repeated_parent_def_level: levels.repeated_parent_def_level,
            field_id: element.field_id.unwrap_or(-1),
            physical_column_index: None,
            coerced: false,
            children,
        })
    }

    /// Repeated group without a list/map annotation:
    ///
    /// ```text
    /// repeated group <name> {
    ///   optional/required <type> <name>;
    ///   ...
    /// }
    /// ```
    ///
    /// produces a non-null array of nullable struct.
    fn parse_repeated_group(&mut self, levels: LevelInfo) -> Result<FieldSchema> {
        let element = self.peek()?;
        let rep_level = levels.rep_level + 1;
        let def_level = levels.def_level + 1;
        let struct_levels = LevelInfo {
            rep_level,
            def_level,
            repeated_parent_def_level: def_level,
        };
        let struct_field = self.parse_struct(struct_levels)?;
        let datatype = DataType::list(struct_field.datatype.clone().make_nullable());
        Ok(FieldSchema {
            name: element.name.clone(),
            datatype,
            physical_type: None,
            repetition_level: rep_level,
            definition_level: def_level,
            repeated_parent_def_level: levels.repeated_parent_def_level,
            field_id: element.field_id.unwrap_or(-1),
            physical_column_index: None,
            coerced: false,
            children: vec![struct_field],
        })
    }

    /// List-annotated group. Supports the legacy two-level form and the
    /// three-level standard form (Spark `list`/`element`, Hive
    /// `bag`/`array_element` naming).
    fn parse_list(&mut self, levels: LevelInfo) -> Result<FieldSchema> {
        let outer = self.peek()?;
        if num_children_node(outer) != 1 {
            return Err(DbError::new(
                DbErrorKind::InvalidListShape,
                format!("list '{}' should have exactly one child", outer.name),
            ));
        }
        if is_repeated_node(outer) {
            return Err(DbError::new(
                DbErrorKind::InvalidListShape,
                format!("list '{}' cannot itself be repeated", outer.name),
            ));
        }
        let Some(middle) = self.elements.get(self.pos + 1) else {
            return Err(DbError::new(
                DbErrorKind::InvalidListShape,
                format!("list '{}' is missing its repeated middle level", outer.name),
            ));
        };
        if !is_repeated_node(middle) {
            return Err(DbError::new(
                DbErrorKind::InvalidListShape,
                format!("the middle level of list '{}' must be repeated", outer.name),
            ));
        }

        let is_optional = is_optional_node(outer);
        let rep_level = levels.rep_level + 1;
        let def_level = levels.def_level + i16::from(is_optional) + 1;
        let child_levels = LevelInfo {
            rep_level,
            def_level,
            repeated_parent_def_level: def_level,
        };

        let num_children = num_children_node(middle);
        let element_type;
        let child;
        if num_children == 0 {
            // Legacy two-level list: a repeated primitive directly under the
            // outer group. Element stays non-null.
            self.pos += 1;
            let elem = self.peek()?;
            child = self.build_physical(elem, false, child_levels)?;
            self.pos += 1;
            element_type = child.datatype.clone();
        } else if num_children == 1 && !is_struct_list_node(middle) {
            // Skip the bag/list wrapper and parse the single field beneath
            // it; produces list<int>, list<map<..>>, list<list<..>>, etc.
            self.pos += 2;
            child = self.parse_node(child_levels)?;
            element_type = child.datatype.clone().make_nullable();
        } else {
            // The middle level holds the struct fields directly.
            self.pos += 1;
            child = self.parse_struct(child_levels)?;
            element_type = child.datatype.clone().make_nullable();
        }

        let mut datatype = DataType::list(element_type);
        if is_optional {
            datatype = datatype.make_nullable();
        }
        Ok(FieldSchema {
            name: outer.name.clone(),
            datatype,
            physical_type: None,
            repetition_level: rep_level,
            definition_level: def_level,
            repeated_parent_def_level: levels.repeated_parent_def_level,
            field_id: outer.field_id.unwrap_or(-1),
            physical_column_index: None,
            coerced: false,
            children: vec![child],
        })
    }

    /// Map-annotated group:
    ///
    /// ```text
    /// optional group <name> (MAP) {
    ///   repeated group map (MAP_KEY_VALUE) {
    ///     required <type> key;
    ///     optional <type> value;
    ///   }
    /// }
    /// ```
    ///
    /// A key-value group with a single child is a SET and parses as a list.
    fn parse_map(&mut self, levels: LevelInfo) -> Result<FieldSchema> {
        let outer = self.peek()?;
        // Outer, key-value group, and at least a key.
        if self.pos + 2 >= self.elements.len() {
            return Err(DbError::new(
                DbErrorKind::InvalidMapShape,
                format!("map '{}' should have at least three levels", outer.name),
            ));
        }
        if num_children_node(outer) != 1 {
            return Err(DbError::new(
                DbErrorKind::InvalidMapShape,
                format!("map '{}' should have exactly one key_value child", outer.name),
            ));
        }
        if is_repeated_node(outer) {
            return Err(DbError::new(
                DbErrorKind::InvalidMapShape,
                format!("map '{}' cannot itself be repeated", outer.name),
            ));
        }
        let key_value = &self.elements[self.pos + 1];
        if !is_group_node(key_value) || !is_repeated_node(key_value) {
            return Err(DbError::new(
                DbErrorKind::InvalidMapShape,
                format!(
                    "the second level of map '{}' must be a repeated group",
                    outer.name
                ),
            ));
        }
        let key = &self.elements[self.pos + 2];
        if !is_required_node(key) {
            // Maps conventionally require non-null keys; tolerate but flag.
            warn!(field = %outer.name, "map type with nullable key column");
        }

        match num_children_node(key_value) {
            // A map without values is a SET.
            1 => return self.parse_list(levels),
            2 => {}
            other => {
                return Err(DbError::new(
                    DbErrorKind::InvalidMapShape,
                    format!(
                        "key_value group of map '{}' should have two children, found {other}",
                        outer.name
                    ),
                ));
            }
        }

        let is_optional = is_optional_node(outer);
        let rep_level = levels.rep_level + 1;
        let def_level = levels.def_level + i16::from(is_optional) + 1;
        let kv_levels = LevelInfo {
            rep_level,
            def_level,
            repeated_parent_def_level: def_level,
        };
        self.pos += 1;
        let kv_field = self.parse_struct(kv_levels)?;

        // Key and value types come from the parsed fields themselves, so a
        // required key stays non-null.
        let key_type = kv_field.children[0].datatype.clone();
        let value_type = kv_field.children[1].datatype.clone();
        let mut datatype = DataType::map(key_type, value_type);
        if is_optional {
            datatype = datatype.make_nullable();
        }
        Ok(FieldSchema {
            name: outer.name.clone(),
            datatype,
            physical_type: None,
            repetition_level: rep_level,
            definition_level: def_level,
            repeated_parent_def_level: levels.repeated_parent_def_level,
            field_id: outer.field_id.unwrap_or(-1),
            physical_column_index: None,
            coerced: false,
            children: vec![kv_field],
        })
    }
}
