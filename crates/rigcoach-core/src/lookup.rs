//! Scene lookups by name, tag and hierarchy.

use std::collections::{HashMap, VecDeque};

use hecs::{Entity, World};
use log::warn;

use crate::components::{Active, Name, Parent, Tag, Transform, Vec3};

/// Read-only queries over the scene graph.
pub trait SceneLookup {
    /// Root or nested object with this name, lowest entity id first.
    fn find_by_name(&self, name: &str) -> Option<Entity>;

    /// Object carrying `tag`, preferring one that is shown.
    fn find_by_tag(&self, tag: &str) -> Option<Entity>;

    /// Nearest descendant of `parent` named `name`.
    fn find_child(&self, parent: Entity, name: &str) -> Option<Entity>;
}

/// [`SceneLookup`] over an ECS world.
///
/// One pass over the world fills name, tag and child maps; lookups after
/// that are map reads. The index borrows the world, so it cannot outlive a
/// change to the scene. Build one and reuse it for a batch of lookups.
pub struct SceneIndex<'w> {
    world: &'w World,
    by_name: HashMap<String, Vec<Entity>>,
    by_tag: HashMap<String, Vec<Entity>>,
    children: HashMap<Entity, Vec<Entity>>,
}

impl<'w> SceneIndex<'w> {
    pub fn new(world: &'w World) -> Self {
        let mut by_name: HashMap<String, Vec<Entity>> = HashMap::new();
        let mut by_tag: HashMap<String, Vec<Entity>> = HashMap::new();
        let mut children: HashMap<Entity, Vec<Entity>> = HashMap::new();

        for (entity, (name, tag, parent)) in world
            .query::<(Option<&Name>, Option<&Tag>, Option<&Parent>)>()
            .iter()
        {
            if let Some(name) = name {
                by_name.entry(name.0.clone()).or_default().push(entity);
            }
            if let Some(tag) = tag {
                by_tag.entry(tag.0.clone()).or_default().push(entity);
            }
            if let Some(parent) = parent {
                children.entry(parent.0).or_default().push(entity);
            }
        }
        for list in by_name
            .values_mut()
            .chain(by_tag.values_mut())
            .chain(children.values_mut())
        {
            list.sort_by_key(|e| e.id());
        }

        Self {
            world,
            by_name,
            by_tag,
            children,
        }
    }

    /// Direct children of `parent`, in entity id order.
    pub fn children(&self, parent: Entity) -> &[Entity] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl SceneLookup for SceneIndex<'_> {
    fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name)?.first().copied()
    }

    fn find_by_tag(&self, tag: &str) -> Option<Entity> {
        let tagged = self.by_tag.get(tag)?;
        tagged
            .iter()
            .copied()
            .find(|e| is_shown(self.world, *e))
            .or_else(|| tagged.first().copied())
    }

    fn find_child(&self, parent: Entity, name: &str) -> Option<Entity> {
        let mut frontier: VecDeque<Entity> = self.children(parent).iter().copied().collect();
        while let Some(entity) = frontier.pop_front() {
            let matches = self
                .world
                .get::<&Name>(entity)
                .map(|n| n.0 == name)
                .unwrap_or(false);
            if matches {
                return Some(entity);
            }
            frontier.extend(self.children(entity).iter().copied());
        }
        None
    }
}

// ── Hierarchy helpers ───────────────────────────────────────────────────

/// Whether the entity and every ancestor is active.
pub fn is_shown(world: &World, entity: Entity) -> bool {
    let mut current = Some(entity);
    while let Some(e) = current {
        if let Ok(active) = world.get::<&Active>(e) {
            if !active.0 {
                return false;
            }
        }
        current = parent_of(world, e);
    }
    true
}

pub fn set_active(world: &mut World, entity: Entity, active: bool) {
    if world.insert_one(entity, Active(active)).is_err() {
        warn!("cannot set active on despawned {:?}", entity);
    }
}

pub fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<&Parent>(entity).ok().map(|p| p.0)
}

/// Position in world space, summing parent translations.
pub fn world_position(world: &World, entity: Entity) -> Option<Vec3> {
    let mut pos = world.get::<&Transform>(entity).ok()?.position;
    let mut current = parent_of(world, entity);
    while let Some(parent) = current {
        if let Ok(t) = world.get::<&Transform>(parent) {
            pos += t.position;
        }
        current = parent_of(world, parent);
    }
    Some(pos)
}

/// Move an entity so its world position becomes `target`.
pub fn set_world_position(world: &mut World, entity: Entity, target: Vec3) {
    let parent_origin = parent_of(world, entity)
        .and_then(|p| world_position(world, p))
        .unwrap_or(Vec3::ZERO);
    if let Ok(mut t) = world.get::<&mut Transform>(entity) {
        t.position = target - parent_origin;
    }
}

/// Re-parent an entity while keeping its world position.
pub fn reparent(world: &mut World, entity: Entity, new_parent: Entity) {
    let Some(pos) = world_position(world, entity) else {
        return;
    };
    if world.insert_one(entity, Parent(new_parent)).is_err() {
        warn!("cannot reparent despawned {:?}", entity);
        return;
    }
    set_world_position(world, entity, pos);
}

/// Despawn an entity and everything below it.
pub fn despawn_recursive(world: &mut World, entity: Entity) {
    let children = SceneIndex::new(world).children(entity).to_vec();
    for child in children {
        despawn_recursive(world, child);
    }
    let _ = world.despawn(entity);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(world: &mut World, name: &str, parent: Option<Entity>, pos: Vec3) -> Entity {
        let e = world.spawn((Name(name.to_string()), Transform::at(pos), Active(true)));
        if let Some(p) = parent {
            world.insert_one(e, Parent(p)).unwrap();
        }
        e
    }

    #[test]
    fn test_find_child_prefers_shallow() {
        let mut world = World::new();
        let root = named(&mut world, "tower", None, Vec3::ZERO);
        let mid = named(&mut world, "hintMobo", Some(root), Vec3::ZERO);
        let deep = named(&mut world, "hole1", Some(mid), Vec3::ZERO);
        let index = SceneIndex::new(&world);
        assert_eq!(index.find_child(root, "hole1"), Some(deep));
        assert_eq!(index.find_child(mid, "hintMobo"), None);
        assert_eq!(index.find_by_name("hintMobo"), Some(mid));
    }

    #[test]
    fn test_world_position_sums_parents() {
        let mut world = World::new();
        let root = named(&mut world, "root", None, Vec3::new(1.0, 0.0, 0.0));
        let child = named(&mut world, "child", Some(root), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(world_position(&world, child), Some(Vec3::new(1.0, 2.0, 0.0)));

        set_world_position(&mut world, child, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(
            world.get::<&Transform>(child).unwrap().position,
            Vec3::new(2.0, 3.0, 3.0)
        );

        let other = named(&mut world, "other", None, Vec3::new(-1.0, 0.0, 0.0));
        reparent(&mut world, child, other);
        assert_eq!(world_position(&world, child), Some(Vec3::new(3.0, 3.0, 3.0)));
    }

    #[test]
    fn test_tag_lookup_prefers_shown() {
        let mut world = World::new();
        let hidden = named(&mut world, "hint_ram1", None, Vec3::ZERO);
        let shown = named(&mut world, "hint_ram2", None, Vec3::ZERO);
        world.insert_one(hidden, Tag("hint_ram".into())).unwrap();
        world.insert_one(shown, Tag("hint_ram".into())).unwrap();
        set_active(&mut world, hidden, false);
        assert_eq!(SceneIndex::new(&world).find_by_tag("hint_ram"), Some(shown));

        set_active(&mut world, shown, false);
        assert_eq!(SceneIndex::new(&world).find_by_tag("hint_ram"), Some(hidden));
    }

    #[test]
    fn test_hidden_parent_hides_child() {
        let mut world = World::new();
        let root = named(&mut world, "root", None, Vec3::ZERO);
        let child = named(&mut world, "child", Some(root), Vec3::ZERO);
        assert!(is_shown(&world, child));
        set_active(&mut world, root, false);
        assert!(!is_shown(&world, child));
    }

    #[test]
    fn test_despawn_recursive() {
        let mut world = World::new();
        let root = named(&mut world, "root", None, Vec3::ZERO);
        let child = named(&mut world, "child", Some(root), Vec3::ZERO);
        let _grandchild = named(&mut world, "grandchild", Some(child), Vec3::ZERO);
        despawn_recursive(&mut world, root);
        assert_eq!(world.len(), 0);
    }

    #[test]
    fn test_index_lists_children_in_id_order() {
        let mut world = World::new();
        let root = named(&mut world, "root", None, Vec3::ZERO);
        let a = named(&mut world, "a", Some(root), Vec3::ZERO);
        let b = named(&mut world, "b", Some(root), Vec3::ZERO);
        let _nested = named(&mut world, "c", Some(a), Vec3::ZERO);
        let index = SceneIndex::new(&world);
        assert_eq!(index.children(root), &[a, b]);
        assert!(index.children(b).is_empty());
        assert_eq!(index.find_by_name("missing"), None);
        assert_eq!(index.find_by_tag("missing"), None);
    }
}
