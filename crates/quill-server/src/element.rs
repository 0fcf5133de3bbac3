//! Query positions and the code elements located at them.

use lsp_types::{Position, TextDocumentPositionParams, Uri};

use crate::errors::HoverError;

/// Zero-based position inside a document, validated at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPosition {
    uri: Uri,
    line: u32,
    character: u32,
}

impl DocumentPosition {
    /// Builds a position from already-unsigned coordinates.
    #[must_use]
    pub const fn new(uri: Uri, line: u32, character: u32) -> Self {
        Self {
            uri,
            line,
            character,
        }
    }

    /// Builds a position from raw request integers.
    ///
    /// # Errors
    ///
    /// Returns [`HoverError::InvalidPosition`] when either coordinate is
    /// negative or does not fit the protocol's unsigned 32-bit range.
    pub fn from_raw(uri: Uri, line: i64, character: i64) -> Result<Self, HoverError> {
        match (u32::try_from(line), u32::try_from(character)) {
            (Ok(valid_line), Ok(valid_character)) => {
                Ok(Self::new(uri, valid_line, valid_character))
            }
            _ => Err(HoverError::invalid_position(&uri, line, character)),
        }
    }

    /// Document being queried.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Zero-based line.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Zero-based character offset within the line.
    #[must_use]
    pub const fn character(&self) -> u32 {
        self.character
    }

    /// Protocol representation of the coordinates.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position {
            line: self.line,
            character: self.character,
        }
    }
}

impl From<&TextDocumentPositionParams> for DocumentPosition {
    fn from(params: &TextDocumentPositionParams) -> Self {
        Self::new(
            params.text_document.uri.clone(),
            params.position.line,
            params.position.character,
        )
    }
}

/// Specificity rank shared by packages and import segments.
pub(crate) const IMPORT_SPECIFICITY: u8 = 3;

/// Named code element found at a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocatedElement {
    /// A class, interface, enum or type variable.
    Type(TypeElement),
    /// A method, constructor or field.
    Member(MemberElement),
    /// A local variable or parameter.
    Variable(VariableElement),
    /// A package.
    Package(PackageElement),
    /// A name the language model could not resolve.
    Unresolved(UnresolvedReference),
    /// Nothing is located at the position.
    None,
}

impl LocatedElement {
    /// Whether nothing was located.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Specificity rank used when several elements enclose a position.
    /// Lower ranks win.
    pub(crate) const fn specificity(&self) -> u8 {
        match self {
            Self::Variable(_) => 0,
            Self::Member(_) => 1,
            Self::Type(_) => 2,
            Self::Package(_) | Self::Unresolved(_) => IMPORT_SPECIFICITY,
            Self::None => u8::MAX,
        }
    }
}

/// Identity of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeElement {
    /// Fully-qualified name, or the bare name of a type variable.
    pub qualified_name: String,
}

impl TypeElement {
    /// Builds a type identity.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
        }
    }
}

/// Declared parameter of a method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Rendered parameter type.
    pub type_name: String,
    /// Source name, when available.
    pub name: Option<String>,
}

impl Parameter {
    /// Builds a parameter with a source name.
    #[must_use]
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: Some(name.into()),
        }
    }

    /// Builds a parameter whose source name is unknown.
    #[must_use]
    pub fn unnamed(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: None,
        }
    }
}

/// Member-specific shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A method with a return type.
    Method {
        /// Rendered return type.
        return_type: String,
        /// Type parameters declared by the method itself.
        type_parameters: Vec<String>,
        /// Declared parameters in order.
        parameters: Vec<Parameter>,
    },
    /// A constructor.
    Constructor {
        /// Type parameters declared by the constructor itself.
        type_parameters: Vec<String>,
        /// Declared parameters in order.
        parameters: Vec<Parameter>,
    },
    /// A field.
    Field {
        /// Rendered field type.
        field_type: String,
    },
}

/// Identity of a method, constructor or field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberElement {
    /// Qualified name of the declaring type.
    pub owner: String,
    /// Simple member name.
    pub name: String,
    /// Member-specific shape.
    pub kind: MemberKind,
}

impl MemberElement {
    /// Builds a method identity without type parameters.
    #[must_use]
    pub fn method(
        owner: impl Into<String>,
        name: impl Into<String>,
        return_type: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            kind: MemberKind::Method {
                return_type: return_type.into(),
                type_parameters: Vec::new(),
                parameters,
            },
        }
    }

    /// Builds a constructor identity.
    #[must_use]
    pub fn constructor(
        owner: impl Into<String>,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            kind: MemberKind::Constructor {
                type_parameters: Vec::new(),
                parameters,
            },
        }
    }

    /// Builds a field identity.
    #[must_use]
    pub fn field(
        owner: impl Into<String>,
        name: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            kind: MemberKind::Field {
                field_type: field_type.into(),
            },
        }
    }

    /// Declares type parameters on a method or constructor. Fields ignore them.
    #[must_use]
    pub fn with_type_parameters<I, S>(mut self, declared: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = declared.into_iter().map(Into::into).collect();
        match &mut self.kind {
            MemberKind::Method {
                type_parameters, ..
            }
            | MemberKind::Constructor {
                type_parameters, ..
            } => *type_parameters = names,
            MemberKind::Field { .. } => {}
        }
        self
    }

    /// Whether the member is a method, the only kind that inherits
    /// documentation from the members it overrides.
    #[must_use]
    pub const fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }
}

/// Erased reference to the method enclosing a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// Qualified name of the declaring type.
    pub owner: String,
    /// Simple method name.
    pub name: String,
    /// Parameter types in order.
    pub parameter_types: Vec<String>,
}

impl MethodRef {
    /// Builds a method reference.
    #[must_use]
    pub fn new<I, S>(owner: impl Into<String>, name: impl Into<String>, parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owner: owner.into(),
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
        }
    }
}

/// Identity of a local variable or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableElement {
    /// Source name.
    pub name: String,
    /// Rendered variable type.
    pub variable_type: String,
    /// Method the variable is declared in, when known.
    pub enclosing: Option<MethodRef>,
}

impl VariableElement {
    /// Builds a variable identity with no enclosing method.
    #[must_use]
    pub fn new(name: impl Into<String>, variable_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variable_type: variable_type.into(),
            enclosing: None,
        }
    }

    /// Records the method the variable is declared in.
    #[must_use]
    pub fn declared_in(mut self, method: MethodRef) -> Self {
        self.enclosing = Some(method);
        self
    }
}

/// Identity of a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageElement {
    /// Fully-qualified package name.
    pub name: String,
}

impl PackageElement {
    /// Builds a package identity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Name token that the language model could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnresolvedReference {
    /// Literal name token under the cursor.
    pub token: String,
}

impl UnresolvedReference {
    /// Builds an unresolved reference.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}
