//! Scene composition: builds every mesh once and describes what to draw as
//! plain data (mesh, material, placement) for the renderer.

use glam::Vec3;
use log::{debug, info};

use crate::camera::{FlyCamera, Movement};
use crate::lighting::{PointLight, SceneLights, SHININESS};
use crate::mesh::{create_cylinder, create_sphere, MeshData, MeshResult};
use crate::params::{DrawMode, LightOrbit, PlayerParams, SceneParams};
use crate::terrain::TerrainBuilder;
use crate::water::{GerstnerWave, WaterSurface};

/// Colour of the moving light marker
const LIGHT_MARKER_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// How an object is shaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Phong shading against all scene lights
    Lit { color: [f32; 3], shininess: f32 },

    /// Constant colour, no lighting
    Flat { color: [f32; 4] },

    /// Wave-displaced, alpha-blended surface
    Water { color: [f32; 4] },
}

/// Index into [`Scene::meshes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Geometry plus the primitive assembly it is uploaded with
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub label: &'static str,
    pub data: MeshData,
    pub draw_mode: DrawMode,
}

/// One draw: a mesh instance placed in the world
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub mesh: MeshId,
    pub material: Material,
    pub translation: Vec3,
}

/// Sphere moved over the xz-plane by the player bindings
#[derive(Debug, Clone)]
pub struct Player {
    position: Vec3,
    max_speed: f32,
}

impl Player {
    pub fn new(params: &PlayerParams) -> Self {
        Self {
            position: Vec3::from_array(params.start),
            max_speed: params.max_speed,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// World-axis movement: forward is -z, right is +x
    pub fn process_movement(&mut self, movement: Movement, dt: f32) {
        let step = self.max_speed * dt;
        let offset = match movement {
            Movement::Forward => Vec3::new(0.0, 0.0, -step),
            Movement::Backward => Vec3::new(0.0, 0.0, step),
            Movement::Left => Vec3::new(-step, 0.0, 0.0),
            Movement::Right => Vec3::new(step, 0.0, 0.0),
        };
        self.position += offset;
    }
}

/// Point light circling the origin
#[derive(Debug, Clone)]
pub struct MovingLight {
    orbit: LightOrbit,
    angle: f32,
}

impl MovingLight {
    pub fn new(orbit: &LightOrbit) -> Self {
        Self {
            orbit: orbit.clone(),
            angle: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.angle = (self.angle + self.orbit.angular_speed * dt) % std::f32::consts::TAU;
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.orbit.radius * self.angle.cos(),
            self.orbit.height,
            self.orbit.radius * self.angle.sin(),
        )
    }
}

/// Everything the renderer draws, plus the state that animates it
#[derive(Debug, Clone)]
pub struct Scene {
    pub meshes: Vec<SceneMesh>,
    pub objects: Vec<SceneObject>,
    pub lights: SceneLights,
    pub wave: GerstnerWave,
    player: Player,
    moving_light: MovingLight,
    player_object: usize,
    light_object: usize,
    time_s: f32,
}

impl Scene {
    pub fn new(params: &SceneParams, draw_mode: DrawMode) -> MeshResult<Self> {
        let mut meshes = Vec::new();
        let mut objects = Vec::new();
        let mut add_mesh = |label: &'static str, data: MeshData, draw_mode: DrawMode| {
            meshes.push(SceneMesh {
                label,
                data,
                draw_mode,
            });
            MeshId(meshes.len() - 1)
        };

        // Terrain
        let terrain = TerrainBuilder::new(params.terrain.seed);
        let mut terrain_mesh = terrain.build_mesh(
            params.terrain.width,
            params.terrain.depth,
            params.terrain.rows,
            params.terrain.cols,
        )?;
        terrain_mesh.recompute_normals();
        objects.push(SceneObject {
            name: "terrain".into(),
            mesh: add_mesh("terrain", terrain_mesh, draw_mode),
            material: Material::Lit {
                color: params.terrain.color,
                shininess: SHININESS,
            },
            translation: Vec3::ZERO,
        });

        // Props resting on the terrain
        let props = &params.props;
        let pillar = add_mesh(
            "pillar",
            create_cylinder(
                props.pillar_bottom_radius,
                props.pillar_top_radius,
                props.pillar_height,
                props.tessellation,
                props.tessellation,
            )?,
            draw_mode,
        );
        let ball = add_mesh(
            "prop sphere",
            create_sphere(props.sphere_radius, props.tessellation, props.tessellation)?,
            draw_mode,
        );
        for (n, &[x, z]) in props.pillar_positions.iter().enumerate() {
            let ground = terrain.height_at(x, z);
            objects.push(SceneObject {
                name: format!("pillar {}", n),
                mesh: pillar,
                material: Material::Lit {
                    color: props.pillar_color,
                    shininess: SHININESS,
                },
                translation: Vec3::new(x, ground + props.pillar_height * 0.5, z),
            });
            objects.push(SceneObject {
                name: format!("sphere {}", n),
                mesh: ball,
                material: Material::Lit {
                    color: props.sphere_color,
                    shininess: SHININESS,
                },
                translation: Vec3::new(x, ground + props.pillar_height + props.sphere_radius, z),
            });
        }

        // Player marker
        let player = Player::new(&params.player);
        let player_object = objects.len();
        let [r, g, b] = params.player.color;
        objects.push(SceneObject {
            name: "player".into(),
            mesh: add_mesh(
                "player",
                create_sphere(params.player.radius, props.tessellation, props.tessellation)?,
                draw_mode,
            ),
            material: Material::Flat {
                color: [r, g, b, 1.0],
            },
            translation: player.position(),
        });

        // Moving light marker, always filled
        let moving_light = MovingLight::new(&params.light_orbit);
        let light_object = objects.len();
        objects.push(SceneObject {
            name: "light marker".into(),
            mesh: add_mesh(
                "light marker",
                create_sphere(params.light_orbit.marker_radius, 12, 12)?,
                DrawMode::Triangles,
            ),
            material: Material::Flat {
                color: LIGHT_MARKER_COLOR,
            },
            translation: moving_light.position(),
        });

        // Water last so it blends over everything opaque
        let water = WaterSurface::new(&params.water)?;
        objects.push(SceneObject {
            name: "water".into(),
            mesh: add_mesh("water", water.mesh, draw_mode),
            material: Material::Water { color: water.color },
            translation: Vec3::ZERO,
        });

        let mut lights = SceneLights::default();
        lights.points[0] = PointLight::at(moving_light.position());

        let scene = Self {
            meshes,
            objects,
            lights,
            wave: water.wave,
            player,
            moving_light,
            player_object,
            light_object,
            time_s: 0.0,
        };

        info!(
            "Scene built: seed={}, {} meshes, {} objects, {} vertices, {:?}",
            params.terrain.seed,
            scene.meshes.len(),
            scene.objects.len(),
            scene.vertex_count(),
            draw_mode
        );

        Ok(scene)
    }

    /// Advance animation by `dt` seconds
    pub fn update(&mut self, dt: f32, camera: &FlyCamera) {
        self.time_s += dt;

        self.moving_light.update(dt);
        let light_pos = self.moving_light.position();
        self.lights.points[0].position = light_pos;
        self.objects[self.light_object].translation = light_pos;

        self.lights.follow_camera(camera.position(), camera.front());
    }

    pub fn move_player(&mut self, movement: Movement, dt: f32) {
        self.player.process_movement(movement, dt);
        self.objects[self.player_object].translation = self.player.position();
        debug!("Player at {:?}", self.player.position());
    }

    pub fn mesh(&self, id: MeshId) -> &SceneMesh {
        &self.meshes[id.0]
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn moving_light(&self) -> &MovingLight {
        &self.moving_light
    }

    /// Seconds since the scene was built, drives the water
    pub fn time_s(&self) -> f32 {
        self.time_s
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.data.vertices.len()).sum()
    }
}
