use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510190003_create_results"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("results"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("register_number")).string().not_null())
                    .col(ColumnDef::new(Alias::new("semester")).string().not_null())
                    .col(ColumnDef::new(Alias::new("branch")).string().not_null())
                    .col(ColumnDef::new(Alias::new("student_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("student_email")).string().not_null())
                    .col(ColumnDef::new(Alias::new("subjects")).json().not_null())
                    .col(ColumnDef::new(Alias::new("total_marks")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("percentage")).double().not_null())
                    .col(ColumnDef::new(Alias::new("pass_status")).string().not_null())
                    .col(ColumnDef::new(Alias::new("attendance_eligibility")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .to_owned(),
            )
            .await?;

        // One result per (register_number, semester, branch).
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_results_student_key")
                    .table(Alias::new("results"))
                    .col(Alias::new("register_number"))
                    .col(Alias::new("semester"))
                    .col(Alias::new("branch"))
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("results")).to_owned())
            .await
    }
}
