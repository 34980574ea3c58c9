use glam::Vec2;

use crate::components::animation::facing_bucket;
use crate::components::entity::Entity;
use crate::components::sprite::Facing;
use crate::core::bounds::Rect;
use crate::renderer::frame::Frame;
use crate::renderer::traits::SpriteDraw;

/// Sprite draw for one entity, or None if it has no sprite.
///
/// `cell_px` is the size of one sheet cell in sheet pixels. Idle bobbing is
/// applied as a vertical offset; facing picks the cell or the rotation.
pub fn entity_draw(entity: &Entity, cell_px: f32) -> Option<SpriteDraw> {
    let sprite = entity.sprite.as_ref()?;

    let mut col = sprite.col;
    let mut row = sprite.row;
    let mut rotation = None;
    match sprite.facing {
        Facing::Fixed => {}
        Facing::Buckets(n) => {
            col += facing_bucket(entity.angle, n) * sprite.span;
            row += entity.walk.frame() * sprite.span;
        }
        Facing::Rotate => rotation = Some(entity.angle),
    }

    let center = entity.pos + Vec2::new(0.0, entity.bob.offset());
    let dest = Rect::centered(center, entity.size);
    let mut draw = SpriteDraw::cell(sprite.atlas, col, row, sprite.span, cell_px, dest)
        .with_alpha(sprite.alpha);
    if let Some(deg) = rotation {
        draw = draw.rotated(deg);
    }
    Some(draw)
}

/// Append a draw for every entity, on the entity's own layer, in iteration order.
/// Callers pass only live entities.
pub fn draw_entities<'a>(entities: impl Iterator<Item = &'a Entity>, cell_px: f32, frame: &mut Frame) {
    for entity in entities {
        if !entity.active {
            continue;
        }
        if let Some(draw) = entity_draw(entity, cell_px) {
            frame.push(entity.layer, draw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::animation::Bob;
    use crate::components::layer::SurfaceLayer;
    use crate::components::sprite::{AtlasId, SpriteComponent};

    #[test]
    fn draws_land_on_entity_layers() {
        let entities = vec![
            Entity::new(EntityId(1))
                .with_pos(Vec2::new(10.0, 20.0))
                .with_size(Vec2::splat(16.0))
                .with_layer(SurfaceLayer::Creatures)
                .with_sprite(SpriteComponent::default()),
            Entity::new(EntityId(2))
                .with_layer(SurfaceLayer::Actors)
                .with_sprite(SpriteComponent::default()),
            Entity::new(EntityId(3)).with_layer(SurfaceLayer::Actors),
        ];
        let mut frame = Frame::new();
        draw_entities(entities.iter(), 8.0, &mut frame);
        assert_eq!(frame.layer(SurfaceLayer::Creatures).len(), 1);
        assert_eq!(frame.layer(SurfaceLayer::Actors).len(), 1);
        assert_eq!(frame.layer(SurfaceLayer::Creatures)[0].dest, Rect::new(2.0, 12.0, 16.0, 16.0));
    }

    #[test]
    fn inactive_entities_are_skipped() {
        let mut entity = Entity::new(EntityId(1)).with_sprite(SpriteComponent::default());
        entity.active = false;
        let mut frame = Frame::new();
        draw_entities(std::iter::once(&entity), 8.0, &mut frame);
        assert_eq!(frame.draw_count(), 0);
    }

    #[test]
    fn bucket_facing_selects_column_and_walk_row() {
        let mut e = Entity::new(EntityId(1)).with_sprite(SpriteComponent {
            atlas: AtlasId(2),
            col: 0,
            row: 4,
            facing: Facing::Buckets(4),
            ..Default::default()
        });
        e.angle = 200.0;
        while !e.walk.tick() {}
        let draw = entity_draw(&e, 8.0).unwrap();
        // bucket 2, walk frame 1
        assert_eq!(draw.src.x.round(), 16.0);
        assert_eq!(draw.src.y.round(), 40.0);
        assert!(draw.rotation_deg.is_none());
    }

    #[test]
    fn rotate_facing_and_bob_offset() {
        let mut e = Entity::new(EntityId(1))
            .with_pos(Vec2::new(50.0, 50.0))
            .with_size(Vec2::splat(10.0))
            .with_bob(Bob::new(std::f32::consts::FRAC_PI_2, 3.0))
            .with_sprite(SpriteComponent::default().with_facing(Facing::Rotate));
        e.angle = 90.0;
        e.bob.advance();
        let draw = entity_draw(&e, 8.0).unwrap();
        assert_eq!(draw.rotation_deg, Some(90.0));
        assert!((draw.dest.center().y - 53.0).abs() < 1e-4);
    }
}
