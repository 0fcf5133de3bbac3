//! In-memory model of a small Java workspace used by hover tests.

use std::str::FromStr;

use lsp_types::{Position, Range, Uri};

use crate::element::{
    LocatedElement, MemberElement, MethodRef, PackageElement, Parameter, TypeElement,
    VariableElement,
};
use crate::index::{ImportReference, ImportSegment};
use crate::memory::InMemoryIndex;

const FOO_SOURCE: &str = "package java;

/**
 * This is foo
 */
public class Foo {
    public static void main(String[] args) {
        System.out.println(\"Hello \" + args[0]);
    }
}
";

const PACKAGE_INFO_SOURCE: &str = "/**
 * this is a **bold** package!
 */
package java.internal;
";

const E_SOURCE: &str = "package test1;
import javax.xml.bind.Binder;
import org.apache.commons.lang3.StringUtils;
public class E<T> {
    public int foo(String s) { return 0; }
    public void foo2(String s, String s2) {}
    public T foo(T s) { return s; }
    public <U> U bar(U s) { return s; }
    private IFoo missing;
}
";

const BAR_SOURCE: &str = "package java;
public class Bar extends Foo {
    @Override
    public void foo() {}
    Runnable task = new Runnable() {};
}
";

/// URI of `java/Foo.java`.
pub fn foo_uri() -> Uri {
    uri("file:///workspace/src/java/Foo.java")
}

/// URI of `java/internal/package-info.java`.
pub fn package_info_uri() -> Uri {
    uri("file:///workspace/src/java/internal/package-info.java")
}

/// URI of `test1/E.java`.
pub fn e_uri() -> Uri {
    uri("file:///workspace/src/test1/E.java")
}

/// URI of `java/Bar.java`.
pub fn bar_uri() -> Uri {
    uri("file:///workspace/src/java/Bar.java")
}

/// URI of a document the index has never seen.
pub fn unknown_uri() -> Uri {
    uri("file:///workspace/src/java/Missing.java")
}

fn uri(text: &str) -> Uri {
    Uri::from_str(text).unwrap_or_else(|error| panic!("invalid test URI {text}: {error}"))
}

fn span(line: u32, start: u32, end: u32) -> Range {
    Range::new(Position::new(line, start), Position::new(line, end))
}

fn package(name: &str) -> LocatedElement {
    LocatedElement::Package(PackageElement::new(name))
}

fn e_method(name: &str, return_type: &str, parameters: Vec<Parameter>) -> MemberElement {
    MemberElement::method("test1.E", name, return_type, parameters)
}

/// Builds the sample workspace index.
pub fn sample_index() -> InMemoryIndex {
    let documents = InMemoryIndex::new()
        .with_document(&foo_uri(), FOO_SOURCE)
        .with_document(&package_info_uri(), PACKAGE_INFO_SOURCE)
        .with_document(&e_uri(), E_SOURCE)
        .with_document(&bar_uri(), BAR_SOURCE);
    with_bar(with_e(with_package_info(with_foo(documents))))
}

fn with_foo(index: InMemoryIndex) -> InMemoryIndex {
    let foo = LocatedElement::Type(TypeElement::new("java.Foo"));
    let main = LocatedElement::Member(MemberElement::method(
        "java.Foo",
        "main",
        "void",
        vec![Parameter::new("String[]", "args")],
    ));
    let args = LocatedElement::Variable(
        VariableElement::new("args", "String[]")
            .declared_in(MethodRef::new("java.Foo", "main", ["String[]"])),
    );
    let uri = foo_uri();
    index
        .with_element(&uri, span(0, 8, 12), package("java"))
        .with_element(&uri, span(5, 13, 16), foo.clone())
        .with_element(&uri, span(6, 23, 27), main)
        .with_element(&uri, span(6, 37, 41), args.clone())
        .with_element(&uri, span(7, 38, 42), args)
        .with_documentation(foo, "This is foo")
}

fn with_package_info(index: InMemoryIndex) -> InMemoryIndex {
    let internal = package("java.internal");
    index
        .with_element(&package_info_uri(), span(3, 8, 21), internal.clone())
        .with_documentation(internal, "this is a **bold** package!")
}

fn with_e(index: InMemoryIndex) -> InMemoryIndex {
    let uri = e_uri();
    let unresolved_import = ImportReference {
        segments: vec![
            ImportSegment::unresolved("javax", span(1, 7, 12)),
            ImportSegment::unresolved("xml", span(1, 13, 16)),
            ImportSegment::unresolved("bind", span(1, 17, 21)),
            ImportSegment::unresolved("Binder", span(1, 22, 28)),
        ],
    };
    let resolved_import = ImportReference {
        segments: vec![
            ImportSegment::resolved("org", span(2, 7, 10), package("org")),
            ImportSegment::resolved("apache", span(2, 11, 17), package("org.apache")),
            ImportSegment::resolved("commons", span(2, 18, 25), package("org.apache.commons")),
            ImportSegment::resolved("lang3", span(2, 26, 31), package("org.apache.commons.lang3")),
            ImportSegment::resolved(
                "StringUtils",
                span(2, 32, 43),
                LocatedElement::Type(TypeElement::new("org.apache.commons.lang3.StringUtils")),
            ),
        ],
    };
    let type_variable = LocatedElement::Type(TypeElement::new("T"));

    index
        .with_import(&uri, span(1, 7, 28), unresolved_import)
        .with_import(&uri, span(2, 7, 43), resolved_import)
        .with_element(&uri, span(3, 13, 14), LocatedElement::Type(TypeElement::new("test1.E")))
        .with_element(&uri, span(3, 15, 16), type_variable.clone())
        .with_element(
            &uri,
            span(4, 15, 18),
            LocatedElement::Member(e_method("foo", "int", vec![Parameter::new("String", "s")])),
        )
        .with_element(
            &uri,
            span(5, 16, 20),
            LocatedElement::Member(e_method("foo2", "void", vec![
                Parameter::new("String", "s"),
                Parameter::new("String", "s2"),
            ])),
        )
        .with_element(&uri, span(6, 11, 12), type_variable)
        .with_element(
            &uri,
            span(6, 13, 16),
            LocatedElement::Member(e_method("foo", "T", vec![Parameter::new("T", "s")])),
        )
        .with_element(
            &uri,
            span(7, 17, 20),
            LocatedElement::Member(
                e_method("bar", "U", vec![Parameter::new("U", "s")]).with_type_parameters(["U"]),
            ),
        )
}

fn with_bar(index: InMemoryIndex) -> InMemoryIndex {
    let uri = bar_uri();
    let overriding =
        LocatedElement::Member(MemberElement::method("java.Bar", "foo", "void", Vec::new()));
    let overridden =
        LocatedElement::Member(MemberElement::method("java.Foo", "foo", "void", Vec::new()));
    index
        .with_element(&uri, span(3, 16, 19), overriding.clone())
        .with_element(&uri, span(4, 24, 32), LocatedElement::Type(TypeElement::new("")))
        .with_supertypes(overriding, vec![overridden.clone()])
        .with_documentation(overridden, "This method comes from Foo")
}
