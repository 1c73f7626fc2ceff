use jgralab::algorithms::{AlgorithmKind, AlgorithmState};
use jgralab::functions::{Permutation, PermutationBuilder};
use jgralab::graph::{AnyElement, EdgeId, Incidence, VertexId};
use jgralab::Direction;

#[test]
fn ids_serialize_as_plain_indices() -> anyhow::Result<()> {
    assert_eq!(serde_json::to_string(&VertexId::new(3))?, "3");
    assert_eq!(serde_json::from_str::<EdgeId>("12")?, EdgeId::new(12));

    let element: AnyElement = serde_json::from_str(r#"{"Vertex":5}"#)?;
    assert_eq!(element, AnyElement::Vertex(VertexId::new(5)));
    Ok(())
}

#[test]
fn enums_keep_their_variant_names() -> anyhow::Result<()> {
    assert_eq!(serde_json::to_string(&Direction::InOut)?, r#""InOut""#);
    assert_eq!(serde_json::to_string(&AlgorithmState::Terminated)?, r#""Terminated""#);
    assert_eq!(
        serde_json::from_str::<AlgorithmKind>(r#""Dijkstra""#)?,
        AlgorithmKind::Dijkstra
    );
    Ok(())
}

#[test]
fn incidences_carry_both_endpoints() -> anyhow::Result<()> {
    let incidence = Incidence {
        edge: EdgeId::new(0),
        this: VertexId::new(1),
        that: VertexId::new(2),
        outgoing: false,
    };
    let json = serde_json::to_value(incidence)?;
    assert_eq!(json["that"], 2);
    assert_eq!(serde_json::from_value::<Incidence>(json)?, incidence);
    Ok(())
}

#[test]
fn permutations_serialize_as_sequences() -> anyhow::Result<()> {
    let mut builder = PermutationBuilder::new();
    for index in [4, 0, 2] {
        builder.add(VertexId::new(index))?;
    }
    let permutation = builder.build();
    assert_eq!(serde_json::to_string(&permutation)?, "[4,0,2]");

    let restored: Permutation<VertexId> = serde_json::from_str("[4,0,2]")?;
    assert_eq!(restored.index_of(&VertexId::new(2)), Some(2));
    assert_eq!(restored.values(), permutation.values());

    // Duplicates are not a bijection.
    assert!(serde_json::from_str::<Permutation<VertexId>>("[1,1]").is_err());
    Ok(())
}
