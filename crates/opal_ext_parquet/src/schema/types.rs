//! Resolved schema types: the typed field tree and its leaf columns.

use std::collections::HashMap;
use std::fmt;

use opal_core::arrays::datatype::DataType;
use opal_core::arrays::field::{ColumnSchema, Field};
use opal_error::{DbError, DbErrorKind, Result};

use crate::basic::Type;
use crate::format::SchemaElement;
use crate::schema::parser::{LevelInfo, SchemaParser, is_group_node};

/// A node in the resolved schema tree.
///
/// Leaves carry a physical type and a physical column index; intermediate
/// nodes (structs, lists, maps) carry neither. Levels are the maxima for
/// the subtree rooted at this node.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub datatype: DataType,
    /// Set only on leaves.
    pub physical_type: Option<Type>,
    pub repetition_level: i16,
    pub definition_level: i16,
    /// Definition level of the nearest repeated ancestor, 0 if none. Used
    /// to tell an empty collection from a null one when decoding levels.
    pub repeated_parent_def_level: i16,
    /// Writer-assigned field id, -1 when absent.
    pub field_id: i32,
    /// Index into the on-disk column chunk order. Set only on leaves.
    pub physical_column_index: Option<usize>,
    /// Whether the resolved type is wider than the annotated one, e.g. an
    /// unsigned 32-bit integer surfaced as Int64.
    pub coerced: bool,
    pub children: Vec<FieldSchema>,
}

impl fmt::Display for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FieldSchema(name={}, type={}, R={}, D={}",
            self.name, self.datatype, self.repetition_level, self.definition_level
        )?;
        for child in &self.children {
            write!(f, ", {child}")?;
        }
        write!(f, ")")
    }
}

/// Per-leaf metadata needed to decode a column chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Position in on-disk column chunk order.
    pub column_index: usize,
    pub name: String,
    pub physical_type: Type,
    pub max_rep_level: i16,
    pub max_def_level: i16,
    pub repeated_parent_def_level: i16,
    pub datatype: DataType,
    /// The raw element the leaf was resolved from.
    pub element: SchemaElement,
}

/// Resolved schema for a whole file: top-level field tree plus flattened
/// leaf columns and a name lookup.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    fields: Vec<FieldSchema>,
    name_to_field: HashMap<String, usize>,
    physical_fields: Vec<ColumnDescriptor>,
}

impl FieldDescriptor {
    /// Resolve a flattened footer element sequence into a typed tree.
    ///
    /// Resolution is pure: the same input always yields the same
    /// descriptor, and the input slice is left untouched.
    pub fn try_from_elements(elements: &[SchemaElement]) -> Result<Self> {
        let Some(root) = elements.first() else {
            return Err(DbError::new(
                DbErrorKind::MalformedRootSchema,
                "schema element sequence is empty",
            ));
        };
        if !is_group_node(root) {
            return Err(DbError::new(
                DbErrorKind::MalformedRootSchema,
                format!("root schema element '{}' must be a group", root.name),
            ));
        }

        let num_fields = root.num_children.max(0) as usize;
        let mut parser = SchemaParser::new(elements);
        let mut fields = Vec::with_capacity(num_fields);
        let mut name_to_field = HashMap::with_capacity(num_fields);
        for _ in 0..num_fields {
            let field = parser.parse_node(LevelInfo::ROOT)?;
            if name_to_field.insert(field.name.clone(), fields.len()).is_some() {
                return Err(DbError::new(
                    DbErrorKind::DuplicateFieldName,
                    format!("duplicate field name '{}' in schema", field.name),
                ));
            }
            fields.push(field);
        }
        let physical_fields = parser.finish()?;

        Ok(FieldDescriptor {
            fields,
            name_to_field,
            physical_fields,
        })
    }

    /// Top-level fields in schema order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Leaf columns in on-disk chunk order.
    pub fn physical_fields(&self) -> &[ColumnDescriptor] {
        &self.physical_fields
    }

    pub fn num_physical_columns(&self) -> usize {
        self.physical_fields.len()
    }

    /// Leaf column by on-disk chunk index.
    pub fn column_descriptor(&self, idx: usize) -> Option<&ColumnDescriptor> {
        self.physical_fields.get(idx)
    }

    /// Index of a top-level field by name.
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.name_to_field.get(name).copied()
    }

    /// Top-level field by name.
    pub fn get_column(&self, name: &str) -> Result<&FieldSchema> {
        self.get_column_index(name)
            .map(|idx| &self.fields[idx])
            .ok_or_else(|| {
                DbError::new(
                    DbErrorKind::FieldNotFound,
                    format!("field '{name}' does not exist in schema"),
                )
            })
    }

    pub fn get_column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Project the top-level fields as an engine column schema, with every
    /// top-level column surfaced nullable.
    pub fn column_schema(&self) -> ColumnSchema {
        ColumnSchema::new(self.fields.iter().map(|f| {
            Field::new(f.name.clone(), f.datatype.clone().make_nullable())
        }))
    }

    /// Reconcile requested column names with Iceberg's Avro name
    /// sanitization.
    ///
    /// Iceberg writers rewrite column names that are not valid Avro
    /// identifiers before embedding them in the file. For each requested
    /// name that would have been rewritten, look up its sanitized form
    /// and rename the matching field back to the requested name. Runs as
    /// a builder-phase step, before the descriptor is shared.
    pub fn sanitize_names<S: AsRef<str>>(&mut self, read_columns: &[S]) {
        for read_col in read_columns {
            let read_col = read_col.as_ref();
            if read_col.is_empty() || is_valid_avro_name(read_col) {
                continue;
            }
            let sanitized = sanitize_avro_name(read_col);
            if let Some(idx) = self.name_to_field.remove(&sanitized) {
                self.fields[idx].name = read_col.to_string();
                self.name_to_field.insert(read_col.to_string(), idx);
            }
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fields=[")?;
        for (idx, field) in self.fields.iter().enumerate() {
            if idx != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}")?;
        }
        write!(f, "]")
    }
}

fn is_valid_avro_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn sanitize_avro_name(name: &str) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(name.len());
    for (idx, c) in name.chars().enumerate() {
        let valid = if idx == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if valid {
            out.push(c);
        } else if idx == 0 && c.is_ascii_digit() {
            out.push('_');
            out.push(c);
        } else {
            let _ = write!(out, "_x{:x}", u32::from(c));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{ConvertedType, Repetition};
    use crate::testutil::{annotated_group, group, primitive, root};

    fn resolve(elements: &[SchemaElement]) -> FieldDescriptor {
        FieldDescriptor::try_from_elements(elements).unwrap()
    }

    #[test]
    fn flat_required_and_optional() {
        let elements = [
            root(2),
            primitive("a", Repetition::REQUIRED, Type::INT32),
            primitive("b", Repetition::OPTIONAL, Type::BYTE_ARRAY),
        ];
        let desc = resolve(&elements);
        assert_eq!(desc.num_physical_columns(), 2);

        let a = desc.get_column("a").unwrap();
        assert_eq!(a.datatype, DataType::int32());
        assert_eq!(a.repetition_level, 0);
        assert_eq!(a.definition_level, 0);
        assert_eq!(a.physical_column_index, Some(0));

        let b = desc.get_column("b").unwrap();
        assert_eq!(b.datatype, DataType::utf8().make_nullable());
        assert_eq!(b.definition_level, 1);
        assert_eq!(b.physical_column_index, Some(1));
    }

    #[test]
    fn three_level_spark_list() {
        // optional group hobbies (LIST) {
        //   repeated group list { optional int32 element; }
        // }
        let elements = [
            root(1),
            annotated_group("hobbies", Repetition::OPTIONAL, ConvertedType::LIST, 1),
            group("list", Repetition::REPEATED, 1),
            primitive("element", Repetition::OPTIONAL, Type::INT32),
        ];
        let desc = resolve(&elements);
        assert_eq!(desc.num_physical_columns(), 1);

        let list = desc.get_column("hobbies").unwrap();
        assert_eq!(
            list.datatype,
            DataType::list(DataType::int32().make_nullable()).make_nullable()
        );
        assert_eq!(list.repetition_level, 1);
        assert_eq!(list.definition_level, 2);
        assert_eq!(list.children.len(), 1);

        let leaf = &list.children[0];
        assert_eq!(leaf.repetition_level, 1);
        assert_eq!(leaf.definition_level, 3);
        assert_eq!(leaf.repeated_parent_def_level, 2);
        assert_eq!(leaf.physical_column_index, Some(0));
    }

    #[test]
    fn legacy_two_level_list() {
        // required group nums (LIST) { repeated int32 nums_tuple; }
        let elements = [
            root(1),
            annotated_group("nums", Repetition::REQUIRED, ConvertedType::LIST, 1),
            primitive("nums_tuple", Repetition::REPEATED, Type::INT32),
        ];
        let desc = resolve(&elements);

        let list = desc.get_column("nums").unwrap();
        // Two-level elements are exactly as repeated, hence non-null.
        assert_eq!(list.datatype, DataType::list(DataType::int32()));
        assert_eq!(list.definition_level, 1);
        assert_eq!(list.children.len(), 1);
        assert_eq!(list.children[0].definition_level, 1);
        assert_eq!(list.children[0].repeated_parent_def_level, 1);
    }

    #[test]
    fn hive_list_of_struct() {
        // optional group people (LIST) {
        //   repeated group bag {
        //     optional group array_element { required int32 id; }
        //   }
        // }
        let elements = [
            root(1),
            annotated_group("people", Repetition::OPTIONAL, ConvertedType::LIST, 1),
            group("bag", Repetition::REPEATED, 1),
            group("array_element", Repetition::OPTIONAL, 1),
            primitive("id", Repetition::REQUIRED, Type::INT32),
        ];
        let desc = resolve(&elements);
        let list = desc.get_column("people").unwrap();
        let expected_struct = DataType::struct_type(vec![Field::new(
            "id".to_string(),
            DataType::int32().make_nullable(),
        )]);
        assert_eq!(
            list.datatype,
            DataType::list(expected_struct.make_nullable()).make_nullable()
        );
    }

    #[test]
    fn struct_list_sentinel_keeps_single_field_struct() {
        // A repeated middle level named "array" with one child is the
        // struct itself, not a wrapper to unwrap.
        let elements = [
            root(1),
            annotated_group("xs", Repetition::OPTIONAL, ConvertedType::LIST, 1),
            group("array", Repetition::REPEATED, 1),
            primitive("v", Repetition::REQUIRED, Type::INT64),
        ];
        let desc = resolve(&elements);
        let list = desc.get_column("xs").unwrap();
        let expected = DataType::struct_type(vec![Field::new(
            "v".to_string(),
            DataType::int64().make_nullable(),
        )]);
        assert_eq!(
            list.datatype,
            DataType::list(expected.make_nullable()).make_nullable()
        );
    }

    #[test]
    fn standard_map() {
        // optional group tags (MAP) {
        //   repeated group key_value {
        //     required byte_array key (UTF8);
        //     optional int32 value;
        //   }
        // }
        let mut key = primitive("key", Repetition::REQUIRED, Type::BYTE_ARRAY);
        key.converted_type = Some(ConvertedType::UTF8);
        let elements = [
            root(1),
            annotated_group("tags", Repetition::OPTIONAL, ConvertedType::MAP, 1),
            group("key_value", Repetition::REPEATED, 2),
            key,
            primitive("value", Repetition::OPTIONAL, Type::INT32),
        ];
        let desc = resolve(&elements);
        assert_eq!(desc.num_physical_columns(), 2);

        let map = desc.get_column("tags").unwrap();
        assert_eq!(
            map.datatype,
            DataType::map(DataType::utf8(), DataType::int32().make_nullable()).make_nullable()
        );
        assert_eq!(map.repetition_level, 1);
        assert_eq!(map.definition_level, 2);

        let kv = &map.children[0];
        let key_field = &kv.children[0];
        assert_eq!(key_field.repetition_level, 1);
        assert_eq!(key_field.definition_level, 2);
        assert_eq!(key_field.repeated_parent_def_level, 2);
        assert_eq!(key_field.physical_column_index, Some(0));

        let value_field = &kv.children[1];
        assert_eq!(value_field.definition_level, 3);
        assert_eq!(value_field.physical_column_index, Some(1));
    }

    #[test]
    fn map_with_optional_key_keeps_nullable_key() {
        logutil::init_test();
        let elements = [
            root(1),
            annotated_group("m", Repetition::OPTIONAL, ConvertedType::MAP, 1),
            group("key_value", Repetition::REPEATED, 2),
            primitive("key", Repetition::OPTIONAL, Type::INT32),
            primitive("value", Repetition::OPTIONAL, Type::INT64),
        ];
        let desc = resolve(&elements);
        let map = desc.get_column("m").unwrap();
        assert_eq!(
            map.datatype,
            DataType::map(
                DataType::int32().make_nullable(),
                DataType::int64().make_nullable(),
            )
            .make_nullable()
        );
    }

    #[test]
    fn map_with_single_child_is_a_set() {
        let elements = [
            root(1),
            annotated_group("s", Repetition::OPTIONAL, ConvertedType::MAP, 1),
            group("key_value", Repetition::REPEATED, 1),
            primitive("key", Repetition::REQUIRED, Type::INT32),
        ];
        let desc = resolve(&elements);
        let set = desc.get_column("s").unwrap();
        assert_eq!(
            set.datatype,
            DataType::list(DataType::int32().make_nullable()).make_nullable()
        );
    }

    #[test]
    fn map_with_three_kv_children_is_invalid() {
        let elements = [
            root(1),
            annotated_group("m", Repetition::OPTIONAL, ConvertedType::MAP, 1),
            group("key_value", Repetition::REPEATED, 3),
            primitive("key", Repetition::REQUIRED, Type::INT32),
            primitive("value", Repetition::OPTIONAL, Type::INT32),
            primitive("extra", Repetition::OPTIONAL, Type::INT32),
        ];
        let err = FieldDescriptor::try_from_elements(&elements).unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::InvalidMapShape);
    }

    #[test]
    fn repeated_list_outer_is_invalid() {
        let elements = [
            root(1),
            annotated_group("l", Repetition::REPEATED, ConvertedType::LIST, 1),
            group("list", Repetition::REPEATED, 1),
            primitive("element", Repetition::OPTIONAL, Type::INT32),
        ];
        let err = FieldDescriptor::try_from_elements(&elements).unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::InvalidListShape);
    }

    #[test]
    fn list_with_two_children_is_invalid() {
        let elements = [
            root(1),
            annotated_group("l", Repetition::OPTIONAL, ConvertedType::LIST, 2),
            primitive("a", Repetition::REPEATED, Type::INT32),
            primitive("b", Repetition::REPEATED, Type::INT32),
        ];
        let err = FieldDescriptor::try_from_elements(&elements).unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::InvalidListShape);
    }

    #[test]
    fn list_with_non_repeated_middle_is_invalid() {
        let elements = [
            root(1),
            annotated_group("l", Repetition::OPTIONAL, ConvertedType::LIST, 1),
            group("list", Repetition::OPTIONAL, 1),
            primitive("element", Repetition::OPTIONAL, Type::INT32),
        ];
        let err = FieldDescriptor::try_from_elements(&elements).unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::InvalidListShape);
    }

    #[test]
    fn list_missing_middle_level_is_invalid() {
        let elements = [
            root(1),
            annotated_group("l", Repetition::OPTIONAL, ConvertedType::LIST, 1),
        ];
        let err = FieldDescriptor::try_from_elements(&elements).unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::InvalidListShape);
    }

    #[test]
    fn repeated_group_becomes_array_of_struct() {
        let elements = [
            root(1),
            group("points", Repetition::REPEATED, 2),
            primitive("x", Repetition::REQUIRED, Type::DOUBLE),
            primitive("y", Repetition::REQUIRED, Type::DOUBLE),
        ];
        let desc = resolve(&elements);
        let arr = desc.get_column("points").unwrap();
        let point = DataType::struct_type(vec![
            Field::new("x".to_string(), DataType::float64().make_nullable()),
            Field::new("y".to_string(), DataType::float64().make_nullable()),
        ]);
        assert_eq!(arr.datatype, DataType::list(point.make_nullable()));
        assert_eq!(arr.repetition_level, 1);
        assert_eq!(arr.definition_level, 1);

        let x = &arr.children[0].children[0];
        assert_eq!(x.repetition_level, 1);
        assert_eq!(x.definition_level, 1);
        assert_eq!(x.repeated_parent_def_level, 1);
    }

    #[test]
    fn bare_repeated_primitive_becomes_array() {
        let elements = [
            root(1),
            primitive("vals", Repetition::REPEATED, Type::INT32),
        ];
        let desc = resolve(&elements);
        assert_eq!(desc.num_physical_columns(), 1);
        let arr = desc.get_column("vals").unwrap();
        assert_eq!(
            arr.datatype,
            DataType::list(DataType::int32().make_nullable())
        );
        assert_eq!(arr.repetition_level, 1);
        assert_eq!(arr.definition_level, 1);
    }

    #[test]
    fn physical_columns_are_gapless_preorder() {
        let elements = [
            root(3),
            primitive("a", Repetition::REQUIRED, Type::INT32),
            group("s", Repetition::OPTIONAL, 2),
            primitive("b", Repetition::OPTIONAL, Type::INT64),
            primitive("c", Repetition::REQUIRED, Type::FLOAT),
            primitive("d", Repetition::OPTIONAL, Type::DOUBLE),
        ];
        let desc = resolve(&elements);
        let names: Vec<_> = desc
            .physical_fields()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        for (idx, col) in desc.physical_fields().iter().enumerate() {
            assert_eq!(col.column_index, idx);
        }
    }

    fn assert_levels_monotone(parent: &FieldSchema) {
        for child in &parent.children {
            assert!(
                child.repetition_level >= parent.repetition_level,
                "{}: rep {} < {}",
                child.name,
                child.repetition_level,
                parent.repetition_level
            );
            assert!(
                child.definition_level >= parent.definition_level,
                "{}: def {} < {}",
                child.name,
                child.definition_level,
                parent.definition_level
            );
            assert_levels_monotone(child);
        }
    }

    #[test]
    fn levels_monotone_in_nested_schema() {
        let elements = [
            root(2),
            annotated_group("m", Repetition::OPTIONAL, ConvertedType::MAP, 1),
            group("key_value", Repetition::REPEATED, 2),
            primitive("key", Repetition::REQUIRED, Type::BYTE_ARRAY),
            annotated_group("v", Repetition::OPTIONAL, ConvertedType::LIST, 1),
            group("list", Repetition::REPEATED, 1),
            primitive("element", Repetition::OPTIONAL, Type::INT32),
            group("points", Repetition::REPEATED, 2),
            primitive("x", Repetition::REQUIRED, Type::DOUBLE),
            primitive("y", Repetition::OPTIONAL, Type::DOUBLE),
        ];
        let desc = resolve(&elements);
        for field in desc.fields() {
            assert_levels_monotone(field);
        }
        // Innermost leaf of the map's list value: three repeated and three
        // optional ancestors deep.
        let elem_leaf = &desc.get_column("m").unwrap().children[0].children[1].children[0];
        assert_eq!(elem_leaf.repetition_level, 2);
        assert_eq!(elem_leaf.definition_level, 5);
        assert_eq!(elem_leaf.repeated_parent_def_level, 4);
    }

    #[test]
    fn empty_schema_is_malformed() {
        let err = FieldDescriptor::try_from_elements(&[]).unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::MalformedRootSchema);
    }

    #[test]
    fn primitive_root_is_malformed() {
        let elements = [primitive("a", Repetition::REQUIRED, Type::INT32)];
        let err = FieldDescriptor::try_from_elements(&elements).unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::MalformedRootSchema);
    }

    #[test]
    fn duplicate_field_names_rejected() {
        let elements = [
            root(2),
            primitive("a", Repetition::REQUIRED, Type::INT32),
            primitive("a", Repetition::OPTIONAL, Type::INT64),
        ];
        let err = FieldDescriptor::try_from_elements(&elements).unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::DuplicateFieldName);
    }

    #[test]
    fn leftover_elements_rejected() {
        let elements = [
            root(1),
            primitive("a", Repetition::REQUIRED, Type::INT32),
            primitive("stray", Repetition::OPTIONAL, Type::INT64),
        ];
        let err = FieldDescriptor::try_from_elements(&elements).unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::SchemaLengthMismatch);
    }

    #[test]
    fn truncated_group_rejected() {
        let elements = [root(1), group("s", Repetition::OPTIONAL, 2)];
        let err = FieldDescriptor::try_from_elements(&elements).unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::SchemaCursorOutOfBounds);
    }

    #[test]
    fn resolution_is_pure() {
        let elements = [
            root(2),
            annotated_group("l", Repetition::OPTIONAL, ConvertedType::LIST, 1),
            group("list", Repetition::REPEATED, 1),
            primitive("element", Repetition::OPTIONAL, Type::INT32),
            primitive("a", Repetition::REQUIRED, Type::INT64),
        ];
        let first = resolve(&elements);
        let second = resolve(&elements);
        assert_eq!(first.fields(), second.fields());
        assert_eq!(first.physical_fields(), second.physical_fields());
    }

    #[test]
    fn lookup_by_name() {
        let elements = [
            root(2),
            primitive("a", Repetition::REQUIRED, Type::INT32),
            primitive("b", Repetition::OPTIONAL, Type::INT64),
        ];
        let desc = resolve(&elements);
        assert_eq!(desc.get_column_index("b"), Some(1));
        assert_eq!(desc.get_column_index("missing"), None);
        let err = desc.get_column("missing").unwrap_err();
        assert_eq!(err.kind(), DbErrorKind::FieldNotFound);
        assert_eq!(desc.get_column_names(), vec!["a", "b"]);
    }

    #[test]
    fn column_schema_projection_is_nullable() {
        let elements = [
            root(1),
            primitive("a", Repetition::REQUIRED, Type::INT32),
        ];
        let desc = resolve(&elements);
        let schema = desc.column_schema();
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].datatype, DataType::int32().make_nullable());
    }

    #[test]
    fn column_descriptor_by_index() {
        let elements = [
            root(2),
            primitive("a", Repetition::REQUIRED, Type::INT32),
            primitive("b", Repetition::OPTIONAL, Type::INT64),
        ];
        let desc = resolve(&elements);
        let col = desc.column_descriptor(1).unwrap();
        assert_eq!(col.name, "b");
        assert_eq!(col.column_index, 1);
        assert!(desc.column_descriptor(2).is_none());
    }

    #[test]
    fn descriptor_display_joins_fields() {
        let elements = [
            root(2),
            primitive("a", Repetition::REQUIRED, Type::INT32),
            group("s", Repetition::OPTIONAL, 1),
            primitive("b", Repetition::OPTIONAL, Type::INT64),
        ];
        let desc = resolve(&elements);
        assert_eq!(
            desc.to_string(),
            "fields=[FieldSchema(name=a, type=int32, R=0, D=0), \
             FieldSchema(name=s, type=nullable<struct<b: nullable<int64>>>, R=0, D=1, \
             FieldSchema(name=b, type=nullable<int64>, R=0, D=2))]"
        );
    }

    #[test]
    fn avro_name_validity() {
        assert!(is_valid_avro_name("abc"));
        assert!(is_valid_avro_name("_a1"));
        assert!(!is_valid_avro_name(""));
        assert!(!is_valid_avro_name("1abc"));
        assert!(!is_valid_avro_name("col-1"));
    }

    #[test]
    fn avro_name_sanitization() {
        assert_eq!(sanitize_avro_name("1abc"), "_1abc");
        assert_eq!(sanitize_avro_name("col-1"), "col_x2d1");
        assert_eq!(sanitize_avro_name("a b"), "a_x20b");
    }

    #[test]
    fn sanitize_names_restores_requested_name() {
        // The writer stored the sanitized form; the reader asks for the
        // original.
        let elements = [
            root(2),
            primitive("col_x2d1", Repetition::OPTIONAL, Type::INT32),
            primitive("plain", Repetition::OPTIONAL, Type::INT64),
        ];
        let mut desc = resolve(&elements);
        desc.sanitize_names(&["col-1", "plain", "missing-2"]);
        assert_eq!(desc.get_column_names(), vec!["col-1", "plain"]);
        assert_eq!(desc.get_column_index("col-1"), Some(0));
        assert_eq!(desc.get_column_index("col_x2d1"), None);
        assert_eq!(desc.get_column_index("plain"), Some(1));
    }
}
