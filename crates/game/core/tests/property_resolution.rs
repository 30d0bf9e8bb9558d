use game_core::{
    Category, Entity, EntityId, Position, Properties, PropertyKey, PropertyValue, Tile,
    TypeRegistry,
};

fn creatures() -> TypeRegistry {
    TypeRegistry::builder()
        .entity(
            "creature",
            None,
            Properties::new().with(PropertyKey::custom("mortal"), true),
        )
        .entity(
            "humanoid",
            Some("creature"),
            Properties::new()
                .with(PropertyKey::custom("has-hands"), true)
                .with(PropertyKey::Hp, 8),
        )
        .entity(
            "goblin",
            Some("humanoid"),
            Properties::new()
                .with(PropertyKey::custom("base-hp"), 5)
                .with(PropertyKey::Hp, 5),
        )
        .tile("floor", None, Properties::new().with(PropertyKey::Walkable, true))
        .build()
        .unwrap()
}

fn goblin() -> Entity {
    Entity::new(EntityId(0), "goblin", Position::new(2, 3))
}

#[test]
fn goblin_inherits_from_the_whole_chain() {
    let registry = creatures();
    let goblin = goblin();

    let resolved: Vec<_> = ["mortal", "has-hands", "base-hp"]
        .into_iter()
        .map(|key| {
            registry
                .resolve_instance_property(&goblin, &PropertyKey::from(key))
                .cloned()
        })
        .collect();
    assert_eq!(
        resolved,
        [
            Some(PropertyValue::Bool(true)),
            Some(PropertyValue::Bool(true)),
            Some(PropertyValue::Int(5)),
        ]
    );
}

#[test]
fn nearest_type_wins() {
    let registry = creatures();
    assert_eq!(registry.resolve_int(&goblin(), &PropertyKey::Hp), Some(5));

    let human = Entity::new(EntityId(1), "humanoid", Position::ORIGIN);
    assert_eq!(registry.resolve_int(&human, &PropertyKey::Hp), Some(8));
}

#[test]
fn instance_values_win_even_when_falsy() {
    let registry = creatures();
    let ghost = goblin()
        .with(PropertyKey::custom("mortal"), false)
        .with(PropertyKey::Hp, 0);

    assert_eq!(
        registry.resolve_instance_property(&ghost, &PropertyKey::custom("mortal")),
        Some(&PropertyValue::Bool(false))
    );
    assert_eq!(registry.resolve_int(&ghost, &PropertyKey::Hp), Some(0));

    let puddle = Tile::new("floor").with(PropertyKey::Walkable, false);
    assert_eq!(registry.resolve_bool(&puddle, &PropertyKey::Walkable), Some(false));
}

#[test]
fn unknown_types_fall_back_to_instance_values_only() {
    let registry = creatures();
    let stray = Entity::new(EntityId(9), "dragon", Position::ORIGIN).with(PropertyKey::Glyph, 'D');

    assert_eq!(
        registry.resolve_instance_property(&stray, &PropertyKey::Glyph),
        Some(&PropertyValue::Char('D'))
    );
    assert_eq!(registry.resolve_instance_property(&stray, &PropertyKey::custom("mortal")), None);
    assert!(!registry.contains(Category::Entity, "dragon"));
    assert!(!registry.has_behavior("dragon"));
}
