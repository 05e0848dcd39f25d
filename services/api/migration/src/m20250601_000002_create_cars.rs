use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cars::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cars::Make).string().not_null())
                    .col(ColumnDef::new(Cars::Model).string().not_null())
                    .col(ColumnDef::new(Cars::Year).integer().not_null())
                    .col(ColumnDef::new(Cars::Price).double().not_null())
                    .col(ColumnDef::new(Cars::Mileage).integer().not_null().default(0))
                    .col(ColumnDef::new(Cars::Color).string().not_null().default(""))
                    .col(ColumnDef::new(Cars::FuelType).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Cars::Transmission)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Cars::EngineSize)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Cars::Horsepower)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Cars::BodyType).string().not_null().default(""))
                    .col(ColumnDef::new(Cars::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Cars::ImageUrl).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Cars::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Cars::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Equality filters on the list endpoint.
        manager
            .create_index(
                Index::create()
                    .name("idx_cars_make_body_type")
                    .table(Cars::Table)
                    .col(Cars::Make)
                    .col(Cars::BodyType)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cars {
    Table,
    Id,
    Make,
    Model,
    Year,
    Price,
    Mileage,
    Color,
    FuelType,
    Transmission,
    EngineSize,
    Horsepower,
    BodyType,
    Description,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
